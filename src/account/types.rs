//! Account data model

use serde::{Deserialize, Serialize};

use crate::backend::identity::{AccessKeyInfo, IssuedKey};

/// Point-in-time read of a user's groups, attached policies and access
/// keys, taken immediately before the deletion steps run.
///
/// Deletion works off this snapshot instead of the tool's naming
/// convention, so accounts whose attachments have drifted still come apart
/// cleanly.
#[derive(Debug, Clone)]
pub struct AccountSnapshot {
    pub username: String,
    pub groups: Vec<String>,
    pub policy_arns: Vec<String>,
    pub access_keys: Vec<AccessKeyInfo>,
}

impl AccountSnapshot {
    /// Human-readable summary printed before deletion starts
    pub fn describe(&self) -> String {
        let mut out = format!("Account {} has:\n", self.username);
        for group in &self.groups {
            out.push_str(&format!("  group: {}\n", group));
        }
        for arn in &self.policy_arns {
            out.push_str(&format!("  policy: {}\n", arn));
        }
        for key in &self.access_keys {
            match key.created {
                Some(created) => out.push_str(&format!(
                    "  access key: {} (created {})\n",
                    key.access_key_id,
                    created.format("%Y-%m-%d")
                )),
                None => out.push_str(&format!("  access key: {}\n", key.access_key_id)),
            }
        }
        out
    }
}

/// Access policy scoped to a single customer bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyDocument {
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Statement")]
    pub statement: Vec<PolicyStatement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyStatement {
    #[serde(rename = "Effect")]
    pub effect: String,
    #[serde(rename = "Action")]
    pub action: String,
    #[serde(rename = "Resource")]
    pub resource: Resource,
}

/// A statement resource: one ARN or a list of ARNs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resource {
    One(String),
    Many(Vec<String>),
}

impl PolicyDocument {
    /// Build the access policy for a customer: list-all-buckets globally,
    /// full access on the customer's bucket and its contents.
    pub fn for_customer(customer: &str) -> Self {
        Self {
            version: "2012-10-17".to_string(),
            statement: vec![
                PolicyStatement {
                    effect: "Allow".to_string(),
                    action: "s3:ListAllMyBuckets".to_string(),
                    resource: Resource::One("arn:aws:s3:::*".to_string()),
                },
                PolicyStatement {
                    effect: "Allow".to_string(),
                    action: "s3:*".to_string(),
                    resource: Resource::Many(vec![
                        format!("arn:aws:s3:::{}", customer),
                        format!("arn:aws:s3:::{}/*", customer),
                    ]),
                },
            ],
        }
    }

    /// Serialize to the JSON body the identity backend expects
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Name of the managed policy created for a customer
pub fn policy_name(customer: &str) -> String {
    format!("{}-limit", customer)
}

/// File name the key pair is exported under
pub fn key_file_name(customer: &str) -> String {
    format!("{}-WasabiKey.txt", customer)
}

/// Text written to the key export file and echoed to the operator
pub fn key_export_text(customer: &str, key: &IssuedKey) -> String {
    format!(
        "Wasabi Key and Secret for {customer}:\n\
         Access Key: {id}\n\
         Secret Key: {secret}\n\
         \n\
         * Please document this key pair in the Wasabi clientinfo Excel file.\n\
         * Do not publish these keys online and store them in a safe place.\n\
         \n\
         You may input this information to set up the customer in MSP360.\n",
        customer = customer,
        id = key.access_key_id,
        secret = key.secret_access_key,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_policy_name_suffix() {
        assert_eq!(policy_name("acme"), "acme-limit");
    }

    #[test]
    fn test_key_file_name() {
        assert_eq!(key_file_name("acme"), "acme-WasabiKey.txt");
    }

    #[test]
    fn test_policy_document_shape() {
        let doc = PolicyDocument::for_customer("acme");
        let json: Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        assert_eq!(json["Version"], "2012-10-17");

        let statements = json["Statement"].as_array().unwrap();
        assert_eq!(statements.len(), 2);

        assert_eq!(statements[0]["Effect"], "Allow");
        assert_eq!(statements[0]["Action"], "s3:ListAllMyBuckets");
        assert_eq!(statements[0]["Resource"], "arn:aws:s3:::*");

        assert_eq!(statements[1]["Effect"], "Allow");
        assert_eq!(statements[1]["Action"], "s3:*");
        let resources = statements[1]["Resource"].as_array().unwrap();
        assert_eq!(resources[0], "arn:aws:s3:::acme");
        assert_eq!(resources[1], "arn:aws:s3:::acme/*");
    }

    #[test]
    fn test_single_resource_serializes_as_string_not_list() {
        let doc = PolicyDocument::for_customer("acme");
        let json: Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        // The global list statement must carry a bare string resource
        assert!(json["Statement"][0]["Resource"].is_string());
        assert!(json["Statement"][1]["Resource"].is_array());
    }

    #[test]
    fn test_policy_document_round_trips() {
        let doc = PolicyDocument::for_customer("acme");
        let parsed: PolicyDocument = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(parsed.statement.len(), 2);
        match &parsed.statement[1].resource {
            Resource::Many(arns) => assert_eq!(arns.len(), 2),
            Resource::One(_) => panic!("bucket statement lost its resource list"),
        }
    }

    #[test]
    fn test_key_export_text_contains_pair() {
        let key = IssuedKey {
            access_key_id: "AKIAEXAMPLE".to_string(),
            secret_access_key: "wJalrXUtnFEMI".to_string(),
        };
        let text = key_export_text("acme", &key);

        assert!(text.starts_with("Wasabi Key and Secret for acme:"));
        assert!(text.contains("Access Key: AKIAEXAMPLE"));
        assert!(text.contains("Secret Key: wJalrXUtnFEMI"));
        assert!(text.contains("Do not publish these keys online"));
    }

    #[test]
    fn test_snapshot_describe_lists_everything() {
        let snapshot = AccountSnapshot {
            username: "acme".to_string(),
            groups: vec!["backupclients".to_string()],
            policy_arns: vec!["arn:aws:iam::100000:policy/acme-limit".to_string()],
            access_keys: vec![AccessKeyInfo {
                access_key_id: "AKIAEXAMPLE".to_string(),
                created: None,
            }],
        };

        let text = snapshot.describe();
        assert!(text.contains("group: backupclients"));
        assert!(text.contains("policy: arn:aws:iam::100000:policy/acme-limit"));
        assert!(text.contains("access key: AKIAEXAMPLE"));
    }
}
