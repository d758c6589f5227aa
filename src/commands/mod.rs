mod common;
mod init;
mod license;
mod rate;
mod validate;

pub use init::{InitArgs, init_config};
pub use license::{LicenseArgs, check_license};
pub use rate::{RateArgs, rate_artifacts};
pub use validate::{ValidateArgs, validate_config};
