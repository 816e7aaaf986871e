//! User-facing strings. Korean is the default since that's who the
//! support desk serves; English is available via `SMARTCS_LOCALE=en`.

use std::fmt;
use std::str::FromStr;

use anyhow::{Error, anyhow};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ko" | "ko-kr" | "ko_kr" => Ok(Locale::Ko),
            "en" | "en-us" | "en_us" => Ok(Locale::En),
            other => Err(anyhow!("Unsupported locale: {}", other)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Locale::Ko => write!(f, "ko"),
            Locale::En => write!(f, "en"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Text {
    AppTitle,
    AppSubtitle,
    TestAccountHint,
    UsernamePrompt,
    PasswordPrompt,
    LoggingIn,
    LoginSucceeded,
    InvalidCredentials,
    LoginError,
    LoggedOut,
    NotLoggedIn,
    Sending,
    ReplyUnavailable,
    NetworkError,
    ApprovalFailed,
    ApprovalProcessed,
    ApprovalTitle,
    ApprovalDetails,
    ApprovalChoices,
    GenericApprovalQuestion,
    FieldItem,
    FieldStatus,
    FieldRequest,
    HistoryTitle,
    HistoryLoading,
    HistoryEmpty,
    HistoryLoadFailed,
    QueryLabel,
    ResultLabel,
    RatingLabel,
    Good,
    Bad,
    PrevPage,
    NextPage,
    IntentGeneral,
    FeedbackSaved,
    FeedbackFailed,
    PressEnter,
    RoleAdmin,
    RoleUser,
    MenuChat,
    MenuHistory,
    MenuSettings,
    InDevelopment,
    Logout,
    UnknownCommand,
    Help,
    SpeakerUser,
    SpeakerAssistant,
    SpeakerSystem,
    Confidence,
    Blocked,
}

impl Locale {
    pub fn text(self, key: Text) -> &'static str {
        match self {
            Locale::Ko => korean(key),
            Locale::En => english(key),
        }
    }

    /// Question shown for a pending transaction of the given type.
    pub fn approval_question(self, action_type: &str) -> String {
        match self {
            Locale::Ko => format!("[{}]를 승인하시겠습니까?", action_type),
            Locale::En => format!("Do you approve [{}]?", action_type),
        }
    }

    pub fn page_info(self, page: usize, total_pages: usize) -> String {
        format!("Page {} of {}", page, total_pages)
    }
}

fn korean(key: Text) -> &'static str {
    match key {
        Text::AppTitle => "Smart CS Agent",
        Text::AppSubtitle => "고객 지원 에이전트 시스템",
        Text::TestAccountHint => "테스트 계정: admin / admin123",
        Text::UsernamePrompt => "아이디: ",
        Text::PasswordPrompt => "비밀번호: ",
        Text::LoggingIn => "로그인 중...",
        Text::LoginSucceeded => "로그인되었습니다.",
        Text::InvalidCredentials => "아이디 또는 비밀번호가 일치하지 않습니다.",
        Text::LoginError => "로그인 중 오류가 발생했습니다.",
        Text::LoggedOut => "로그아웃되었습니다.",
        Text::NotLoggedIn => "로그인이 필요합니다. `smartcs login` 을 먼저 실행하세요.",
        Text::Sending => "전송 중...",
        Text::ReplyUnavailable => "응답을 생성하는 중 문제가 발생했습니다.",
        Text::NetworkError => "네트워크 오류가 발생했습니다. 백엔드 서버를 확인해주세요.",
        Text::ApprovalFailed => "승인 요청 처리 중 오류가 발생했습니다.",
        Text::ApprovalProcessed => "처리되었습니다.",
        Text::ApprovalTitle => "승인 요청",
        Text::ApprovalDetails => "세부 정보",
        Text::ApprovalChoices => "[y] 승인  [n] 취소",
        Text::GenericApprovalQuestion => "요청을 승인하시겠습니까?",
        Text::FieldItem => "항목",
        Text::FieldStatus => "상태",
        Text::FieldRequest => "요청",
        Text::HistoryTitle => "대화 기록",
        Text::HistoryLoading => "기록을 불러오는 중...",
        Text::HistoryEmpty => "대화 기록이 없습니다.",
        Text::HistoryLoadFailed => "기록을 불러오지 못했습니다.",
        Text::QueryLabel => "문의:",
        Text::ResultLabel => "결과:",
        Text::RatingLabel => "만족도 평가:",
        Text::Good => "👍 좋음",
        Text::Bad => "👎 나쁨",
        Text::PrevPage => "< 이전",
        Text::NextPage => "다음 >",
        Text::IntentGeneral => "일반",
        Text::FeedbackSaved => "피드백이 저장되었습니다.",
        Text::FeedbackFailed => "피드백 전송에 실패했습니다.",
        Text::PressEnter => "계속하려면 Enter를 누르세요.",
        Text::RoleAdmin => "관리자",
        Text::RoleUser => "사용자",
        Text::MenuChat => "채팅",
        Text::MenuHistory => "대화 기록",
        Text::MenuSettings => "설정",
        Text::InDevelopment => "개발 중",
        Text::Logout => "로그아웃",
        Text::UnknownCommand => "알 수 없는 명령입니다. /help 를 입력하세요.",
        Text::Help => {
            "/chat 채팅  /history 대화 기록  /next /prev 페이지 이동\n/good <id> /bad <id> 만족도 평가  /sidebar 메뉴 표시  /logout 로그아웃  /quit 종료"
        }
        Text::SpeakerUser => "나",
        Text::SpeakerAssistant => "상담원",
        Text::SpeakerSystem => "시스템",
        Text::Confidence => "신뢰도",
        Text::Blocked => "검증 필터 적용됨",
    }
}

fn english(key: Text) -> &'static str {
    match key {
        Text::AppTitle => "Smart CS Agent",
        Text::AppSubtitle => "Customer support agent system",
        Text::TestAccountHint => "Test account: admin / admin123",
        Text::UsernamePrompt => "Username: ",
        Text::PasswordPrompt => "Password: ",
        Text::LoggingIn => "Logging in...",
        Text::LoginSucceeded => "Logged in.",
        Text::InvalidCredentials => "Username or password does not match.",
        Text::LoginError => "An error occurred while logging in.",
        Text::LoggedOut => "Logged out.",
        Text::NotLoggedIn => "You are not logged in. Run `smartcs login` first.",
        Text::Sending => "Sending...",
        Text::ReplyUnavailable => "There was a problem generating a reply.",
        Text::NetworkError => "A network error occurred. Please check the backend server.",
        Text::ApprovalFailed => "An error occurred while processing the approval.",
        Text::ApprovalProcessed => "Done.",
        Text::ApprovalTitle => "Approval request",
        Text::ApprovalDetails => "Details",
        Text::ApprovalChoices => "[y] Approve  [n] Cancel",
        Text::GenericApprovalQuestion => "Do you approve this request?",
        Text::FieldItem => "Item",
        Text::FieldStatus => "Status",
        Text::FieldRequest => "Request",
        Text::HistoryTitle => "Conversation history",
        Text::HistoryLoading => "Loading history...",
        Text::HistoryEmpty => "No conversation history.",
        Text::HistoryLoadFailed => "Failed to load history.",
        Text::QueryLabel => "Query:",
        Text::ResultLabel => "Result:",
        Text::RatingLabel => "Rating:",
        Text::Good => "👍 Good",
        Text::Bad => "👎 Bad",
        Text::PrevPage => "< Prev",
        Text::NextPage => "Next >",
        Text::IntentGeneral => "General",
        Text::FeedbackSaved => "Feedback saved.",
        Text::FeedbackFailed => "Failed to send feedback.",
        Text::PressEnter => "Press Enter to continue.",
        Text::RoleAdmin => "Administrator",
        Text::RoleUser => "User",
        Text::MenuChat => "Chat",
        Text::MenuHistory => "History",
        Text::MenuSettings => "Settings",
        Text::InDevelopment => "in development",
        Text::Logout => "Log out",
        Text::UnknownCommand => "Unknown command. Type /help.",
        Text::Help => {
            "/chat chat  /history history  /next /prev change page\n/good <id> /bad <id> rate an answer  /sidebar toggle menu  /logout log out  /quit exit"
        }
        Text::SpeakerUser => "You",
        Text::SpeakerAssistant => "Agent",
        Text::SpeakerSystem => "System",
        Text::Confidence => "confidence",
        Text::Blocked => "filtered by validation",
    }
}
