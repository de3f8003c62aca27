//! Configuration module

mod site;

pub use site::AboutConfig;
pub use site::ContactConfig;
pub use site::SiteConfig;
