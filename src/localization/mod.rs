pub use fluent_templates::Loader;
use std::fmt;
use std::str::FromStr;
use unic_langid::{langid, LanguageIdentifier};

fluent_templates::static_loader! {
    pub static LOCALES = {
        locales: "./locales",
        fallback_language: "zh-CN",
        // bidi isolation marks would end up verbatim in the template message
        customise: |bundle| bundle.set_use_isolating(false),
    };
}

macro_rules! localize {
    // Case 1: No arguments provided
    ( $lang:expr, $text_id:expr ) => {{
        use $crate::localization::Loader as _;
        $crate::localization::LOCALES.lookup(&$lang.langid(), $text_id)
    }};

    // Case 2: One or more arguments provided
    ( $lang:expr, $text_id:expr, $( $arg_name:ident: $arg_value:expr ),* $(,)? ) => {{
        use $crate::localization::Loader as _;
        let args = std::collections::HashMap::from_iter([
            $(  // key-value pair (Cow<str>, FluentValue::String)
                (std::borrow::Cow::from(stringify!($arg_name)),
                fluent_templates::fluent_bundle::FluentValue::String($arg_value.to_string().into()))
            ),*
        ]);
        $crate::localization::LOCALES.lookup_with_args(&$lang.langid(), $text_id, &args)
    }};
}

pub(crate) use localize;

/// Display language of the notification. Also decides the language the weather provider answers in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    ZhCn,
    EnUs,
}
impl Language {
    pub fn langid(&self) -> LanguageIdentifier {
        match self {
            Language::ZhCn => langid!("zh-CN"),
            Language::EnUs => langid!("en-US"),
        }
    }

    pub fn chrono_locale(&self) -> chrono::Locale {
        match self {
            Language::ZhCn => chrono::Locale::zh_CN,
            Language::EnUs => chrono::Locale::en_US,
        }
    }

    /// Value of the `lang` query parameter understood by Caiyun
    pub fn provider_code(&self) -> &'static str {
        match self {
            Language::ZhCn => "zh_CN",
            Language::EnUs => "en_US",
        }
    }
}
impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.langid())
    }
}
impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" => Ok(Language::ZhCn),
            "en" | "en-us" => Ok(Language::EnUs),
            other => Err(format!("unsupported language '{}', expected zh-CN or en-US", other)),
        }
    }
}

fn lookup_or_passthrough(lang: Language, prefix: &str, code: &str) -> String {
    let text_id = format!("{}-{}", prefix, code);
    LOCALES
        .try_lookup(&lang.langid(), &text_id)
        .unwrap_or_else(|| code.to_string())
}

/// Localized name of a Caiyun sky condition code, e.g. `LIGHT_RAIN`. Unknown codes are returned as-is.
pub fn sky_condition(lang: Language, code: &str) -> String {
    lookup_or_passthrough(lang, "skycon", code)
}

/// Localized name of a compass wind direction, e.g. `northwest`. Unknown directions are returned as-is.
pub fn wind_direction(lang: Language, code: &str) -> String {
    lookup_or_passthrough(lang, "wind", code)
}
