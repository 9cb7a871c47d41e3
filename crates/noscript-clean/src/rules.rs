//! Fixed rule set
//!
//! Every literal the passes match against lives here so the rules can be
//! audited and tested apart from the traversal code.

/// Elements removed when their `id` attribute equals one of these exactly
pub const REMOVED_IDS: &[&str] = &[
    "stage-slideover-sidebar",
    "page-header",
    "thread-bottom-container",
    "pointer-events-none",
];

/// Elements removed when their whole `class` attribute equals one of these.
///
/// Matching is on the raw attribute string, not on class tokens: an element
/// with an extra or reordered class does not match.
pub const REMOVED_CLASSES: &[&str] = &[
    "absolute start-0 end-0 bottom-full z-20",
    "flex min-h-[46px] justify-start",
    "user-message-bubble-color",
];

/// Elements removed when their `style` attribute equals this exactly
pub const REMOVED_STYLE: &str = "opacity: 1;";

/// Attribute stripped from every `<link>`
pub const STRIPPED_LINK_ATTR: &str = "crossorigin";

/// `<link href>` suffix (query string ignored) marking a script resource
pub const SCRIPT_LINK_SUFFIX: &str = ".js";

/// Class token of the single draggable `<div>` to drop
pub const DRAGGABLE_CLASS: &str = "draggable";

/// Element that receives the injected heading's container
pub const HEADING_SCOPE_TAG: &str = "article";

/// Tag of the injected heading
pub const HEADING_TAG: &str = "h1";

/// Zero-based position of the `<div>` (in document order inside the first
/// `<article>`) that receives the heading
pub const HEADING_DIV_INDEX: usize = 2;

/// Where the untouched input is copied before it is overwritten
pub const BACKUP_FILE: &str = "index-1.html";

/// Input file used when none is given
pub const DEFAULT_INPUT_FILE: &str = "index.html";
