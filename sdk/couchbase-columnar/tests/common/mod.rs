pub mod mock_core;
pub mod test_config;
pub mod test_environment;

use couchbase_columnar::credential::Credential;

pub fn default_credential() -> Credential {
    Credential::from_username_and_password("Administrator", "password")
}
