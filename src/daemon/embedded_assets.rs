/// Browser-side action dispatcher served to the index page.
pub const SCRIPT_JS: &str = include_str!("../../assets/script.js");

/// Path the dispatcher script is served under.
pub const SCRIPT_PATH: &str = "/public/script.js";
