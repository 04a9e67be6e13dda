use html_escape::encode_text;

use crate::models::{Block, EmailMeta};
use crate::render::{CompileOptions, compile_block_with};

/// Client resets shared by every compiled email
const RESET_CSS: &str = r#"        html, body {
            margin: 0 auto !important;
            padding: 0 !important;
            height: 100% !important;
            width: 100% !important;
        }
        * {
            -ms-text-size-adjust: 100%;
            -webkit-text-size-adjust: 100%;
        }
        div[style*="margin: 16px 0"] {
            margin: 0 !important;
        }
        table, td {
            mso-table-lspace: 0pt !important;
            mso-table-rspace: 0pt !important;
        }
        table {
            border-spacing: 0 !important;
            border-collapse: collapse !important;
            table-layout: fixed !important;
            margin: 0 auto !important;
        }
        img {
            -ms-interpolation-mode: bicubic;
        }
        a {
            text-decoration: none;
        }
        *[x-apple-data-detectors], .unstyle-auto-detected-links *,
        .aBn {
            border-bottom: 0 !important;
            cursor: default !important;
            color: inherit !important;
            text-decoration: none !important;
            font-size: inherit !important;
            font-family: inherit !important;
            font-weight: inherit !important;
            line-height: inherit !important;
        }
"#;

/// Compile a whole email with the default layout
pub fn compile(blocks: &[Block], meta: &EmailMeta) -> String {
    compile_with(blocks, meta, &CompileOptions::default())
}

/// Compile a whole email: boilerplate head, hidden preview text, then every
/// root block in order inside a fixed-width centred table.
pub fn compile_with(blocks: &[Block], meta: &EmailMeta, options: &CompileOptions) -> String {
    let fragments = blocks
        .iter()
        .map(|block| compile_block_with(block, options))
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let mut html = String::with_capacity(RESET_CSS.len() + fragments.len() + 2048);
    html.push_str(&head(meta, options));
    html.push_str(&format!(
        r#"<body style="margin: 0; padding: 0; background-color: {background};">
    <!-- Preview Text -->
    <div style="display: none; max-height: 0; overflow: hidden;">{snippet}</div>
    <!-- Email Content -->
    <table width="100%" border="0" cellpadding="0" cellspacing="0" role="presentation">
        <tr>
            <td align="center" style="padding: 10px 0;">
                <table width="{width}" border="0" cellpadding="0" cellspacing="0" role="presentation" style="width: 100%; max-width: {width}px;">
                    <tbody>
                        <tr>
                            <td>
{fragments}
                            </td>
                        </tr>
                    </tbody>
                </table>
            </td>
        </tr>
    </table>
</body>
</html>
"#,
        background = html_escape::encode_double_quoted_attribute(&options.body_background),
        snippet = encode_text(&meta.snippet),
        width = options.content_width,
    ));
    html
}

fn head(meta: &EmailMeta, options: &CompileOptions) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en" xmlns="http://www.w3.org/1999/xhtml">
<head>
    <meta charset="UTF-8" />
    <meta http-equiv="X-UA-Compatible" content="IE=edge" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{title}</title>
    <style type="text/css">
{RESET_CSS}        @media only screen and (max-width: {breakpoint}px) {{
            .responsiveTable {{
                width: 100% !important;
            }}
            .responsive-image {{
                height: auto !important;
                max-width: 100% !important;
                width: 100% !important;
            }}
        }}
    </style>
</head>
"#,
        title = encode_text(&meta.subject),
        breakpoint = options.mobile_breakpoint,
    )
}
