pub const HOME_URL: &str = "/";
pub const QUOTA_URL: &str = "/quota";
pub const QUIZ_URL: &str = "/quiz";
pub const SELECT_ANSWER_URL: &str = "/quiz/select";
pub const NEXT_QUESTION_URL: &str = "/quiz/next";
pub const PREVIOUS_QUESTION_URL: &str = "/quiz/prev";
pub const SUBMIT_QUIZ_URL: &str = "/quiz/submit";
pub const RESULT_URL: &str = "/result";
pub const FORM_URL: &str = "/form";

pub const QUIZ_SESSION_COOKIE_NAME: &str = "quiz_session";
pub const OUTCOME_COOKIE_NAME: &str = "quiz_outcome";

pub const QUIZ_SESSION_TTL_SECS: u64 = 3600;
pub const OUTCOME_TTL_SECS: u64 = 300;
pub const MAX_QUIZ_SESSIONS: usize = 10_000;
pub const MAX_PENDING_OUTCOMES: usize = 10_000;

// Campaign
pub const TOTAL_QUOTA: u64 = 350;
pub const DEFAULT_API_ORIGIN: &str = "https://b.test.yuqi-tech.cn";
pub const DEFAULT_API_NAMESPACE: &str = "tmp-activity/cjyf";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

// i18n
pub const LOCALE_COOKIE_NAME: &str = "lang";
pub const DEFAULT_LOCALE: &str = "zh-CN";
pub const SUPPORTED_LOCALES: &[&str] = &["zh-CN", "en"];
pub const SET_LOCALE_URL: &str = "/set-locale";
