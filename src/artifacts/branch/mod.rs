pub mod branch_name;

/// Branch names are file names under `.lit/branches`, so on top of git's
/// ref-name rules they may not contain path separators.
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\.\.|[/\\]|\.lock$|@\{|[\x00-\x20\*:\?\[~\^\x7f]";

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";
