pub mod caiyun;
pub mod common;
pub mod geo_time;
pub mod wechat;
