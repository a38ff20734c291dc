//! Cloudflare API wire types

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Response of `GET /zones/:zone_id/dns_records`
///
/// Only the fields the synchronizer reads are modelled.
#[derive(Debug, Deserialize)]
pub(crate) struct DnsRecordList {
    #[serde(default)]
    pub result: Vec<DnsRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DnsRecord {
    pub id: String,
    pub name: String,
}

/// Body of `PUT /zones/:zone_id/dns_records/:record_id`
///
/// Managed records are always A records; the type is never rewritten.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct RecordUpdate {
    #[serde(rename = "type")]
    pub record_type: &'static str,
    pub name: String,
    pub content: String,
}

impl RecordUpdate {
    pub fn new(hostname: &str, ip: IpAddr) -> Self {
        Self {
            record_type: "A",
            name: hostname.to_string(),
            content: ip.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_always_an_a_record() {
        let v4 = RecordUpdate::new("a.example.com", "1.1.1.1".parse().unwrap());
        let v6 = RecordUpdate::new("a.example.com", "2606:4700::1111".parse().unwrap());
        assert_eq!(v4.record_type, "A");
        assert_eq!(v6.record_type, "A");
        assert_eq!(
            serde_json::to_value(&v4).unwrap(),
            serde_json::json!({ "type": "A", "name": "a.example.com", "content": "1.1.1.1" })
        );
    }

    #[test]
    fn listing_ignores_unknown_fields() {
        let listing: DnsRecordList = serde_json::from_str(
            r#"{"success":true,"result":[{"id":"r1","name":"a.example.com","ttl":1,"proxied":false}]}"#,
        )
        .unwrap();
        assert_eq!(listing.result.len(), 1);
        assert_eq!(listing.result[0].id, "r1");
    }
}
