//! Sponsor and partner model.

use serde::{Deserialize, Serialize};

string_enum! {
    SponsorType {
        Embassy => "embassy",
        Partner => "partner",
        Network => "network",
        Sponsor => "sponsor",
    }
}

/// An embassy, partner organization, network or sponsor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sponsor {
    #[serde(default)]
    pub id: String,
    /// Thai name.
    pub name: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(rename = "type")]
    pub sponsor_type: SponsorType,
    /// Display order, lower first.
    #[serde(default)]
    pub order: i64,
}

/// Sponsors grouped the way the sponsors page shows them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SponsorGroups {
    pub embassies: Vec<Sponsor>,
    pub partners: Vec<Sponsor>,
    pub networks: Vec<Sponsor>,
}

impl SponsorGroups {
    /// Group already ordered sponsors; plain `sponsor` entries are not listed.
    pub fn from_ordered(sponsors: Vec<Sponsor>) -> Self {
        let mut groups = Self::default();
        for sponsor in sponsors {
            match sponsor.sponsor_type {
                SponsorType::Embassy => groups.embassies.push(sponsor),
                SponsorType::Partner => groups.partners.push(sponsor),
                SponsorType::Network => groups.networks.push(sponsor),
                SponsorType::Sponsor => {}
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sponsor(name: &str, sponsor_type: SponsorType) -> Sponsor {
        Sponsor {
            id: name.to_string(),
            name: name.to_string(),
            name_en: String::new(),
            description: String::new(),
            description_en: String::new(),
            logo: None,
            sponsor_type,
            order: 0,
        }
    }

    #[test]
    fn test_grouping_keeps_order() {
        let groups = SponsorGroups::from_ordered(vec![
            sponsor("Royal Thai Embassy", SponsorType::Embassy),
            sponsor("KOTRA", SponsorType::Partner),
            sponsor("TSA Japan", SponsorType::Network),
            sponsor("Cafe", SponsorType::Sponsor),
            sponsor("Consulate", SponsorType::Embassy),
        ]);

        let embassies: Vec<&str> = groups.embassies.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(embassies, vec!["Royal Thai Embassy", "Consulate"]);
        assert_eq!(groups.partners.len(), 1);
        assert_eq!(groups.networks.len(), 1);
    }

    #[test]
    fn test_type_field_name() {
        let value = serde_json::to_value(sponsor("KOTRA", SponsorType::Partner)).unwrap();
        assert_eq!(value["type"], "partner");
        assert_eq!(value["nameEn"], "");
    }
}
