/// Knobs for the HTML compiler. Defaults produce the standard 650px layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Fixed width of every layout table, in pixels
    pub content_width: u32,
    /// Viewport width at or below which the mobile rules apply
    pub mobile_breakpoint: u32,
    /// `<body>` background colour
    pub body_background: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            content_width: 650,
            mobile_breakpoint: 480,
            body_background: "#ffffff".to_string(),
        }
    }
}
