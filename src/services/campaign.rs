use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

use super::lead::{LeadForm, LeadSubmission, SubmitFailure, SubmitOutcome};
use crate::names;

const SUCCESS_CODE: i64 = 200;
const DEFAULT_FAILURE_MSG: &str = "请求失败";

#[derive(Debug, Error)]
pub enum CampaignError {
    /// The backend answered with a business code other than 200.
    #[error("{msg}")]
    Rejected { code: i64, msg: String },
    #[error("网络连接失败，请检查网络连接或联系管理员")]
    Unreachable(#[source] reqwest::Error),
    #[error("Network Error")]
    Network(#[source] reqwest::Error),
    #[error("Request failed with status code {0}")]
    Status(u16),
    /// Body was not a readable envelope. The detail is logged, never shown.
    #[error("请求失败")]
    Malformed(String),
}

impl CampaignError {
    fn transport(err: reqwest::Error) -> Self {
        if err.is_connect() {
            CampaignError::Unreachable(err)
        } else {
            CampaignError::Network(err)
        }
    }
}

/// Response envelope shared by every campaign endpoint. A missing `code`
/// counts as a failure.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: Option<i64>,
    pub msg: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn into_result(self) -> Result<Option<T>, CampaignError> {
        if self.code != Some(SUCCESS_CODE) {
            return Err(CampaignError::Rejected {
                code: self.code.unwrap_or_default(),
                msg: self
                    .msg
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| DEFAULT_FAILURE_MSG.to_string()),
            });
        }
        Ok(self.data)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct CountData {
    /// Places already taken; older backends omit it.
    #[serde(default)]
    pub used: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaCount {
    pub total: u64,
    pub used: u64,
    pub count: u64,
    pub remaining: u64,
}

impl QuotaCount {
    pub fn from_used(used: u64) -> Self {
        Self {
            total: names::TOTAL_QUOTA,
            used,
            count: names::TOTAL_QUOTA,
            remaining: names::TOTAL_QUOTA.saturating_sub(used),
        }
    }

    /// Used when the count cannot be fetched; never blocks entry.
    pub fn fallback() -> Self {
        Self::from_used(0)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

// ---------------------------------------------------------------------------
// CampaignApi trait (seam for the remote backend)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait CampaignApi: Send + Sync {
    fn fetch_count(
        &self,
    ) -> impl std::future::Future<Output = Result<CountData, CampaignError>> + Send;

    fn submit_lead(
        &self,
        lead: &LeadSubmission,
    ) -> impl std::future::Future<Output = Result<(), CampaignError>> + Send;
}

#[derive(Clone)]
pub struct HttpCampaignApi {
    client: reqwest::Client,
    count_url: String,
    submit_url: String,
}

impl HttpCampaignApi {
    pub fn new(origin: &str, namespace: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let origin = origin.trim_end_matches('/');
        let namespace = namespace.trim_matches('/');

        Ok(Self {
            client,
            count_url: format!("{origin}/api/{namespace}/count"),
            submit_url: format!("{origin}/api/{namespace}"),
        })
    }
}

async fn read_envelope<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<Option<T>, CampaignError> {
    let status = resp.status();
    if !status.is_success() {
        tracing::error!("campaign backend answered HTTP {status}");
        return Err(CampaignError::Status(status.as_u16()));
    }

    let envelope: Envelope<T> = resp.json().await.map_err(|e| {
        tracing::error!("unreadable campaign response: {e}");
        CampaignError::Malformed(e.to_string())
    })?;
    tracing::debug!(code = ?envelope.code, msg = ?envelope.msg, "campaign response");

    envelope.into_result()
}

impl CampaignApi for HttpCampaignApi {
    async fn fetch_count(&self) -> Result<CountData, CampaignError> {
        tracing::debug!("GET {}", self.count_url);
        let resp = self
            .client
            .get(&self.count_url)
            .send()
            .await
            .map_err(CampaignError::transport)?;

        read_envelope::<CountData>(resp)
            .await?
            .ok_or_else(|| CampaignError::Malformed("count response has no data".to_string()))
    }

    async fn submit_lead(&self, lead: &LeadSubmission) -> Result<(), CampaignError> {
        tracing::debug!("POST {} for site {}", self.submit_url, lead.site);
        let resp = self
            .client
            .post(&self.submit_url)
            .json(lead)
            .send()
            .await
            .map_err(CampaignError::transport)?;

        read_envelope::<serde_json::Value>(resp).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CampaignService
// ---------------------------------------------------------------------------

pub struct CampaignService<A: CampaignApi = HttpCampaignApi> {
    api: A,
}

impl<A: CampaignApi + Clone> Clone for CampaignService<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<A: CampaignApi> CampaignService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Remaining places. Any failure yields the full quota so the landing
    /// page never blocks on the backend.
    pub async fn fetch_quota(&self) -> QuotaCount {
        match self.api.fetch_count().await {
            Ok(CountData { used: Some(used) }) => {
                let quota = QuotaCount::from_used(used);
                tracing::info!("quota: {} used, {} remaining", quota.used, quota.remaining);
                quota
            }
            Ok(CountData { used: None }) => {
                tracing::warn!("count response has no `used` field, assuming 0");
                QuotaCount::from_used(0)
            }
            Err(e) => {
                tracing::warn!("could not fetch quota, using fallback: {e:?}");
                QuotaCount::fallback()
            }
        }
    }

    /// Validates locally and, only if that passes, sends exactly one
    /// submission to the backend.
    pub async fn submit_lead(&self, form: &LeadForm) -> SubmitOutcome {
        let lead = match form.validate() {
            Ok(lead) => lead,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        match self.api.submit_lead(&lead).await {
            Ok(()) => {
                tracing::info!("lead accepted for site {}", lead.site);
                SubmitOutcome::Accepted
            }
            Err(e) => {
                let failure = SubmitFailure::classify(&e);
                tracing::warn!("lead rejected: {e:?} ({failure:?})");
                SubmitOutcome::Failed(failure)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{
        models::PICKUP_SITES,
        services::lead::{FieldIssue, LeadField},
    };

    fn service(mock: MockCampaignApi) -> CampaignService<MockCampaignApi> {
        CampaignService::new(mock)
    }

    fn valid_form() -> LeadForm {
        LeadForm {
            name: " 王五 ".to_string(),
            phone: "13800000000".to_string(),
            site: PICKUP_SITES[0].to_string(),
        }
    }

    // ----- envelope tests -----

    #[test]
    fn envelope_with_non_success_code_is_rejected() {
        let envelope: Envelope<CountData> =
            serde_json::from_str(r#"{"code":500,"msg":"活动数量已完成"}"#).unwrap();
        let err = envelope.into_result().unwrap_err();
        assert!(matches!(err, CampaignError::Rejected { code: 500, ref msg } if msg == "活动数量已完成"));
    }

    #[test]
    fn envelope_without_msg_gets_default_text() {
        let envelope: Envelope<CountData> = serde_json::from_str(r#"{"code":400}"#).unwrap();
        assert_eq!(envelope.into_result().unwrap_err().to_string(), "请求失败");
    }

    #[test]
    fn envelope_without_code_is_rejected() {
        let envelope: Envelope<CountData> = serde_json::from_str(r#"{"msg":"x"}"#).unwrap();
        assert!(matches!(
            envelope.into_result().unwrap_err(),
            CampaignError::Rejected { code: 0, ref msg } if msg == "x"
        ));
    }

    #[test]
    fn malformed_body_hides_decoder_detail() {
        let err = CampaignError::Malformed("error decoding response body".to_string());
        assert_eq!(err.to_string(), "请求失败");
        assert_eq!(
            SubmitFailure::classify(&err),
            SubmitFailure::Other("请求失败".to_string())
        );
    }

    #[test]
    fn missing_used_field_is_none() {
        let envelope: Envelope<CountData> =
            serde_json::from_str(r#"{"code":200,"data":{"other":1}}"#).unwrap();
        assert_eq!(envelope.into_result().unwrap(), Some(CountData { used: None }));
    }

    #[test]
    fn quota_never_goes_negative() {
        assert_eq!(QuotaCount::from_used(400).remaining, 0);
        assert_eq!(QuotaCount::from_used(349).remaining, 1);
        assert!(QuotaCount::from_used(350).is_exhausted());
    }

    // ----- fetch_quota tests -----

    #[tokio::test]
    async fn fetch_quota_computes_remaining() {
        let mut mock = MockCampaignApi::new();
        mock.expect_fetch_count()
            .returning(|| Box::pin(async { Ok(CountData { used: Some(350) }) }));

        let quota = service(mock).fetch_quota().await;
        assert_eq!(quota.remaining, 0);
        assert_eq!(quota.total, 350);
        assert_eq!(quota.used, 350);
    }

    #[tokio::test]
    async fn fetch_quota_defaults_missing_used_to_zero() {
        let mut mock = MockCampaignApi::new();
        mock.expect_fetch_count()
            .returning(|| Box::pin(async { Ok(CountData { used: None }) }));

        let quota = service(mock).fetch_quota().await;
        assert_eq!(quota, QuotaCount::from_used(0));
    }

    #[tokio::test]
    async fn fetch_quota_failure_falls_back_to_full_quota() {
        let mut mock = MockCampaignApi::new();
        mock.expect_fetch_count().returning(|| {
            Box::pin(async { Err(CampaignError::Malformed("boom".to_string())) })
        });

        let quota = service(mock).fetch_quota().await;
        assert_eq!(
            quota,
            QuotaCount {
                total: 350,
                used: 0,
                count: 350,
                remaining: 350
            }
        );
    }

    // ----- submit_lead tests -----

    #[tokio::test]
    async fn invalid_form_never_reaches_backend() {
        // No expectation set: any call to submit_lead would panic.
        let mock = MockCampaignApi::new();
        let form = LeadForm {
            phone: "1380000000".to_string(),
            ..valid_form()
        };

        let outcome = service(mock).submit_lead(&form).await;
        assert!(matches!(
            outcome,
            SubmitOutcome::Invalid(ref errors) if errors.get(LeadField::Phone) == Some(FieldIssue::InvalidPhone)
        ));
    }

    #[tokio::test]
    async fn valid_form_is_submitted_once_and_trimmed() {
        let mut mock = MockCampaignApi::new();
        mock.expect_submit_lead()
            .times(1)
            .withf(|lead| lead.name == "王五" && lead.phone == "13800000000")
            .returning(|_| Box::pin(async { Ok(()) }));

        let outcome = service(mock).submit_lead(&valid_form()).await;
        assert!(matches!(outcome, SubmitOutcome::Accepted));
    }

    #[tokio::test]
    async fn duplicate_message_maps_to_canned_failure() {
        let mut mock = MockCampaignApi::new();
        mock.expect_submit_lead().returning(|_| {
            Box::pin(async {
                Err(CampaignError::Rejected {
                    code: 500,
                    msg: "手机号重复添加".to_string(),
                })
            })
        });

        let outcome = service(mock).submit_lead(&valid_form()).await;
        assert!(matches!(
            outcome,
            SubmitOutcome::Failed(SubmitFailure::DuplicatePhone)
        ));
    }

    #[tokio::test]
    async fn http_status_errors_pass_through() {
        let mut mock = MockCampaignApi::new();
        mock.expect_submit_lead()
            .returning(|_| Box::pin(async { Err(CampaignError::Status(404)) }));

        let outcome = service(mock).submit_lead(&valid_form()).await;
        assert!(matches!(
            outcome,
            SubmitOutcome::Failed(SubmitFailure::Other(ref m)) if m == "Request failed with status code 404"
        ));
    }
}
