use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use rust_i18n::t;
use serde::{Deserialize, Serialize};

use super::campaign::CampaignError;
use crate::models;

/// Mainland mobile number: 11 ASCII digits, `1` then `3`-`9`.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9][0-9]{9}$").expect("phone pattern compiles"));

// Substrings the campaign backend and transport layer put in error messages.
const QUOTA_EXHAUSTED_MARKER: &str = "活动数量已完成";
const DUPLICATE_MARKER: &str = "重复添加";
const UNREACHABLE_MARKER: &str = "网络连接失败";
const NETWORK_ERROR_MARKER: &str = "Network Error";

// Business codes returned in the response envelope. Only the first two have
// a canned message; the rest show the backend's `msg`.
pub const CODE_DUPLICATE_PHONE: i64 = 3001;
pub const CODE_QUOTA_EXCEEDED: i64 = 3002;
pub const CODE_ACTIVITY_ENDED: i64 = 3003;
pub const CODE_INVALID_DATA: i64 = 4001;
pub const CODE_SERVER_ERROR: i64 = 5000;

/// Raw lead form input as posted by the browser.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LeadForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub site: String,
}

/// A validated lead, in the shape the campaign backend expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub name: String,
    pub phone: String,
    pub site: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LeadField {
    Name,
    Phone,
    Site,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssue {
    Required,
    InvalidPhone,
    UnknownSite,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<LeadField, FieldIssue>);

impl FieldErrors {
    pub fn get(&self, field: LeadField) -> Option<FieldIssue> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn message(&self, field: LeadField, locale: &str) -> Option<String> {
        let issue = self.get(field)?;
        let msg = match (field, issue) {
            (LeadField::Name, _) => t!("form.errors.name_required", locale = locale),
            (LeadField::Phone, _) => t!("form.errors.phone_invalid", locale = locale),
            (LeadField::Site, FieldIssue::UnknownSite) => {
                t!("form.errors.site_unknown", locale = locale)
            }
            (LeadField::Site, _) => t!("form.errors.site_required", locale = locale),
        };
        Some(msg.to_string())
    }

    fn insert(&mut self, field: LeadField, issue: FieldIssue) {
        self.0.insert(field, issue);
    }
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

impl LeadForm {
    /// Checks every field and returns either the trimmed submission or all
    /// field errors at once.
    pub fn validate(&self) -> Result<LeadSubmission, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(LeadField::Name, FieldIssue::Required);
        }

        if self.phone.is_empty() {
            errors.insert(LeadField::Phone, FieldIssue::Required);
        } else if !is_valid_phone(&self.phone) {
            errors.insert(LeadField::Phone, FieldIssue::InvalidPhone);
        }

        if self.site.is_empty() {
            errors.insert(LeadField::Site, FieldIssue::Required);
        } else if !models::is_pickup_site(&self.site) {
            errors.insert(LeadField::Site, FieldIssue::UnknownSite);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(LeadSubmission {
            name: name.to_string(),
            phone: self.phone.clone(),
            site: self.site.clone(),
        })
    }
}

/// User-facing classification of a failed lead submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    QuotaExhausted,
    DuplicatePhone,
    NetworkUnreachable,
    NetworkError,
    /// Unrecognised failure; the message is shown as is.
    Other(String),
}

impl SubmitFailure {
    /// Business codes and transport kinds decide first; message substrings
    /// are only consulted for errors those do not cover.
    pub fn classify(err: &CampaignError) -> Self {
        match err {
            CampaignError::Rejected { code, .. } if *code == CODE_DUPLICATE_PHONE => {
                return SubmitFailure::DuplicatePhone
            }
            CampaignError::Rejected { code, .. } if *code == CODE_QUOTA_EXCEEDED => {
                return SubmitFailure::QuotaExhausted
            }
            CampaignError::Unreachable(_) => return SubmitFailure::NetworkUnreachable,
            CampaignError::Network(_) => return SubmitFailure::NetworkError,
            _ => {}
        }

        Self::from_message(&err.to_string())
    }

    pub fn from_message(message: &str) -> Self {
        if message.contains(QUOTA_EXHAUSTED_MARKER) {
            SubmitFailure::QuotaExhausted
        } else if message.contains(DUPLICATE_MARKER) {
            SubmitFailure::DuplicatePhone
        } else if message.contains(UNREACHABLE_MARKER) {
            SubmitFailure::NetworkUnreachable
        } else if message.contains(NETWORK_ERROR_MARKER) {
            SubmitFailure::NetworkError
        } else {
            SubmitFailure::Other(message.to_string())
        }
    }

    pub fn message(&self, locale: &str) -> String {
        match self {
            SubmitFailure::QuotaExhausted => {
                t!("form.failure.quota_exhausted", locale = locale).to_string()
            }
            SubmitFailure::DuplicatePhone => {
                t!("form.failure.duplicate_phone", locale = locale).to_string()
            }
            SubmitFailure::NetworkUnreachable => {
                t!("form.failure.network_unreachable", locale = locale).to_string()
            }
            SubmitFailure::NetworkError => {
                t!("form.failure.network_error", locale = locale).to_string()
            }
            SubmitFailure::Other(message) => message.clone(),
        }
    }
}

pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Invalid(FieldErrors),
    Accepted,
    Failed(SubmitFailure),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, phone: &str, site: &str) -> LeadForm {
        LeadForm {
            name: name.to_string(),
            phone: phone.to_string(),
            site: site.to_string(),
        }
    }

    fn rejected(code: i64, msg: &str) -> CampaignError {
        CampaignError::Rejected {
            code,
            msg: msg.to_string(),
        }
    }

    #[test]
    fn phone_pattern() {
        assert!(is_valid_phone("13800000000"));
        assert!(is_valid_phone("19912345678"));
        assert!(!is_valid_phone("12345678901"));
        assert!(!is_valid_phone("1380000000"));
        assert!(!is_valid_phone("138000000000"));
        assert!(!is_valid_phone("1380000000a"));
        assert!(!is_valid_phone("1380000000٣"));
    }

    #[test]
    fn valid_form_is_trimmed() {
        let lead = form("  张三 ", "13800000000", models::PICKUP_SITES[1])
            .validate()
            .unwrap();
        assert_eq!(lead.name, "张三");
        assert_eq!(lead.phone, "13800000000");
        assert_eq!(lead.site, models::PICKUP_SITES[1]);
    }

    #[test]
    fn every_field_error_is_collected() {
        let errors = form("   ", "12345678901", "").validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(LeadField::Name), Some(FieldIssue::Required));
        assert_eq!(errors.get(LeadField::Phone), Some(FieldIssue::InvalidPhone));
        assert_eq!(errors.get(LeadField::Site), Some(FieldIssue::Required));
    }

    #[test]
    fn unknown_site_is_rejected() {
        let errors = form("李四", "13800000000", "火星基地")
            .validate()
            .unwrap_err();
        assert_eq!(errors.get(LeadField::Site), Some(FieldIssue::UnknownSite));
        assert_eq!(errors.get(LeadField::Name), None);
    }

    #[test]
    fn field_messages_are_localised() {
        let errors = form("", "13800000000", models::PICKUP_SITES[0])
            .validate()
            .unwrap_err();
        assert_eq!(
            errors.message(LeadField::Name, "zh-CN").as_deref(),
            Some("请输入姓名")
        );
        assert_eq!(errors.message(LeadField::Phone, "zh-CN"), None);
    }

    #[test]
    fn business_codes_take_precedence_over_messages() {
        assert_eq!(
            SubmitFailure::classify(&rejected(3001, "anything")),
            SubmitFailure::DuplicatePhone
        );
        assert_eq!(
            SubmitFailure::classify(&rejected(3002, "重复添加")),
            SubmitFailure::QuotaExhausted
        );
    }

    #[test]
    fn unknown_codes_fall_back_to_message_markers() {
        assert_eq!(
            SubmitFailure::classify(&rejected(500, "该手机号重复添加")),
            SubmitFailure::DuplicatePhone
        );
        assert_eq!(
            SubmitFailure::classify(&rejected(500, "活动数量已完成")),
            SubmitFailure::QuotaExhausted
        );
        assert_eq!(
            SubmitFailure::from_message("网络连接失败，请检查网络连接或联系管理员"),
            SubmitFailure::NetworkUnreachable
        );
        assert_eq!(
            SubmitFailure::from_message("Network Error"),
            SubmitFailure::NetworkError
        );
    }

    #[test]
    fn unrecognised_messages_pass_through() {
        let failure = SubmitFailure::classify(&rejected(4001, "姓名过长"));
        assert_eq!(failure, SubmitFailure::Other("姓名过长".to_string()));
        assert_eq!(failure.message("zh-CN"), "姓名过长");
    }

    #[test]
    fn codes_without_canned_message_show_backend_text() {
        for (code, msg) in [
            (CODE_ACTIVITY_ENDED, "很抱歉，活动已结束，感谢您的参与！"),
            (CODE_INVALID_DATA, "提交的数据无效，请检查后重试"),
            (CODE_SERVER_ERROR, "服务器错误，请稍后重试"),
        ] {
            let failure = SubmitFailure::classify(&rejected(code, msg));
            assert_eq!(failure.message("zh-CN"), msg);
        }
    }

    #[test]
    fn duplicate_phone_uses_canned_message() {
        let failure = SubmitFailure::classify(&rejected(500, "手机号重复添加"));
        let message = failure.message("zh-CN");
        assert_eq!(message, "该手机号已存在，请使用其他手机号");
        assert!(!message.contains("重复添加"));
    }
}
