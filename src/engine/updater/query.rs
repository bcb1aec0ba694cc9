//! Update query form fields

use crate::engine::config::DeviceIdentity;

pub const QUERY_ACTION: &str = "querynewfirmware";
pub const CHECKSUM_TYPE: &str = "sha256";

/// Form payload for one "query new firmware" request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateQuery {
    fields: Vec<(&'static str, String)>,
}

impl UpdateQuery {
    pub fn new(identity: &DeviceIdentity) -> Self {
        let mut fields = vec![
            ("action", QUERY_ACTION.to_string()),
            ("devicemodel", identity.model.clone()),
            ("deviceid", identity.device_id.clone()),
            ("curfirmwarever", identity.firmware_version.clone()),
            ("locale", identity.locale.clone()),
            ("pid", identity.partner_id.clone()),
            ("ChecksumType", CHECKSUM_TYPE.to_string()),
        ];
        if let Some(country_code) = identity.country_code() {
            fields.push(("nationcode", country_code.to_string()));
        }
        Self { fields }
    }

    /// Ordered (name, value) pairs, ready for form encoding
    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}
