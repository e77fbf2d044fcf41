use uuid::Uuid;

use crate::state::{AsyncOperationResult, CursorMove};
use crate::ui::Screen;

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    NavigateTo(Screen),
    NavigateBack,

    // Remote data
    Refresh,
    ToggleScript,
    BuyPerk,

    // Configuration editor
    FetchConfig,
    SaveConfig,
    ResetConfig,
    ToggleConfigMode,
    ConfigToggle,
    BeginFieldEdit,
    BeginBadgeAdd,
    RemoveBadge,
    BeginRawEdit,
    SelectBadge(bool),

    // Forum
    ToggleForumView,
    ExportForumHtml,

    // Console
    ConsoleSubmit,
    ConsoleComplete,
    ConsoleHistory(bool),

    // Text input
    InputChar(char),
    InputBackspace,
    InputNewline,
    InputCursor(CursorMove),
    InputSubmit,
    InputCancel,

    // Selection/UI
    SelectNext,
    SelectPrevious,
    ScrollDown,
    ScrollUp,
    ToggleSidebar,
    CycleTheme,

    // Async operation results
    AsyncOperationCompleted(Uuid, Result<AsyncOperationResult, String>),

    // Notifications
    DismissNotification,

    // System
    Quit,

    // No-op
    None,
}
