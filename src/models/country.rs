use serde::{Deserialize, Serialize};

/// Country entry as kept in the store (dropdowns for nationality/ethnicity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub label: String,
    pub demonym: String,
    pub iso: String,
}

/// Shape returned by the third-party countries API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCountry {
    pub name: String,
    #[serde(default)]
    pub demonym: String,
    pub alpha2_code: String,
}

impl From<RemoteCountry> for Country {
    fn from(remote: RemoteCountry) -> Self {
        Self {
            label: remote.name,
            demonym: remote.demonym,
            iso: remote.alpha2_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_country_maps_to_store_shape() {
        let remote: RemoteCountry = serde_json::from_str(
            r#"{"name":"Nigeria","demonym":"Nigerian","alpha2Code":"NG"}"#,
        )
        .unwrap();
        let country = Country::from(remote);
        assert_eq!(country.label, "Nigeria");
        assert_eq!(country.demonym, "Nigerian");
        assert_eq!(country.iso, "NG");
    }
}
