//! HTML and URL escaping.

/// Tags that the `tagfilter` extension neutralises.
const FILTERED_TAGS: [&str; 9] = [
    "title",
    "textarea",
    "style",
    "xmp",
    "iframe",
    "noembed",
    "noframes",
    "script",
    "plaintext",
];

/// Appends `text` with `&`, `<`, `>` and `"` replaced by entities.
pub fn escape_html(out: &mut String, text: &str) {
    let mut last = 0;
    for (index, byte) in text.bytes().enumerate() {
        let entity = match byte {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            _ => continue,
        };
        out.push_str(&text[last..index]);
        out.push_str(entity);
        last = index + 1;
    }
    out.push_str(&text[last..]);
}

/// Returns true if `byte` may appear unescaped in an `href` attribute.
fn is_href_safe(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b'-'
                | b'.'
                | b'/'
                | b':'
                | b';'
                | b'='
                | b'?'
                | b'@'
                | b'_'
                | b'~'
        )
}

/// Appends `url` escaped for use in an `href` or `src` attribute.
///
/// Existing percent escapes are kept, `&` and `'` become entities and every
/// other unsafe byte is percent-encoded. Non-ASCII characters are encoded
/// one UTF-8 byte at a time.
pub fn escape_href(out: &mut String, url: &str) {
    for byte in url.bytes() {
        match byte {
            _ if is_href_safe(byte) => out.push(char::from(byte)),
            b'&' => out.push_str("&amp;"),
            b'\'' => out.push_str("&#x27;"),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
}

/// Returns true for URLs with a scheme that can run script.
///
/// Inline images in common raster formats are allowed.
pub fn is_dangerous_url(url: &str) -> bool {
    let lower = url.get(..20).unwrap_or(url).to_ascii_lowercase();
    if lower.starts_with("data:") {
        return !["png", "gif", "jpeg", "webp"]
            .iter()
            .any(|format| lower.starts_with(&format!("data:image/{format}")));
    }
    ["javascript:", "vbscript:", "file:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

/// Returns true if the HTML starting at `html` opens or closes one of the
/// tags neutralised by the `tagfilter` extension.
pub fn is_filtered_tag(html: &str) -> bool {
    let bytes = html.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'<' {
        return false;
    }
    let start = if bytes[1] == b'/' { 2 } else { 1 };

    FILTERED_TAGS.iter().any(|tag| {
        let end = start + tag.len();
        let Some(name) = bytes.get(start..end) else {
            return false;
        };
        if !name.eq_ignore_ascii_case(tag.as_bytes()) {
            return false;
        }
        match bytes.get(end) {
            Some(b'>') => true,
            Some(byte) if byte.is_ascii_whitespace() => true,
            Some(b'/') => bytes.get(end + 1) == Some(&b'>'),
            _ => false,
        }
    })
}

/// Appends a raw HTML block, replacing the `<` of every filtered tag with
/// `&lt;`.
pub fn filter_html(out: &mut String, html: &str) {
    let mut last = 0;
    for (index, _) in html.match_indices('<') {
        if is_filtered_tag(&html[index..]) {
            out.push_str(&html[last..index]);
            out.push_str("&lt;");
            last = index + 1;
        }
    }
    out.push_str(&html[last..]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn html(text: &str) -> String {
        let mut out = String::new();
        escape_html(&mut out, text);
        out
    }

    fn href(url: &str) -> String {
        let mut out = String::new();
        escape_href(&mut out, url);
        out
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(html("a < b && \"c\" > d"), "a &lt; b &amp;&amp; &quot;c&quot; &gt; d");
        assert_eq!(html("it's / fine"), "it's / fine");
    }

    #[rstest]
    #[case::plain("https://example.com/a?b=c#d", "https://example.com/a?b=c#d")]
    #[case::space("/my url", "/my%20url")]
    #[case::ampersand("/?a=1&b=2", "/?a=1&amp;b=2")]
    #[case::quote("/it's", "/it&#x27;s")]
    #[case::percent_kept("/a%20b", "/a%20b")]
    #[case::unicode("/ä", "/%C3%A4")]
    #[case::unicode_between_ascii("/café?q=ü", "/caf%C3%A9?q=%C3%BC")]
    #[case::brackets("/[x]", "/%5Bx%5D")]
    fn test_escape_href(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(href(url), expected);
    }

    #[rstest]
    #[case("javascript:alert(1)", true)]
    #[case("JAVASCRIPT:alert(1)", true)]
    #[case("vbscript:x", true)]
    #[case("file:///etc/passwd", true)]
    #[case("data:text/html,x", true)]
    #[case("data:image/png;base64,x", false)]
    #[case("https://example.com", false)]
    fn test_dangerous_url(#[case] url: &str, #[case] dangerous: bool) {
        assert_eq!(is_dangerous_url(url), dangerous);
    }

    #[rstest]
    #[case("<script>", true)]
    #[case("</SCRIPT>", true)]
    #[case("<style type=\"x\">", true)]
    #[case("<title/>", true)]
    #[case("<scripts>", false)]
    #[case("<div>", false)]
    #[case("<xmp", false)]
    fn test_filtered_tag(#[case] tag: &str, #[case] filtered: bool) {
        assert_eq!(is_filtered_tag(tag), filtered);
    }

    #[test]
    fn test_filter_html() {
        let mut out = String::new();
        filter_html(&mut out, "<div><script>x</script></div>\n");
        assert_eq!(out, "<div>&lt;script>x&lt;/script></div>\n");
    }
}
