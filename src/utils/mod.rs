pub mod client_ip;
pub mod long_url;
pub mod short_id;
