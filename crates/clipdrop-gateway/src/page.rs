use clipdrop_core::{VideoInfo, VideoResult};
use std::fmt::Write;

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>TikTok Downloader</title>
</head>
<body>
<main>
<h1>TikTok Downloader</h1>
<form method="post" action="/">
<input type="url" name="url" placeholder="https://www.tiktok.com/@user/video/..." required>
<button type="submit">Download</button>
</form>
"#;

const TAIL: &str = "</main>\n</body>\n</html>\n";

/// Renders the main page, with the outcome of a submission if there is one.
pub fn render_page(record: Option<&VideoResult>) -> String {
    let mut html = String::from(HEAD);
    match record {
        None => {}
        Some(VideoResult::Ready(info)) => render_info(&mut html, info),
        Some(VideoResult::Failed { error }) => {
            let _ = writeln!(html, r#"<p class="error">{}</p>"#, escape(error));
        }
    }
    html.push_str(TAIL);
    html
}

fn render_info(html: &mut String, info: &VideoInfo) {
    html.push_str("<section class=\"result\">\n");
    if let Some(thumbnail) = &info.thumbnail {
        let _ = writeln!(
            html,
            r#"<img src="{}" alt="thumbnail" width="240">"#,
            escape(thumbnail)
        );
    }
    let _ = writeln!(html, "<h2>{}</h2>", escape(&info.title));
    let _ = writeln!(html, "<p>by {}</p>", escape(&info.uploader));
    let _ = writeln!(
        html,
        "<ul>\n<li>Duration: {}s</li>\n<li>Likes: {}</li>\n<li>Comments: {}</li>\n<li>Reposts: {}</li>\n<li>Views: {}</li>\n</ul>",
        info.duration,
        escape(&info.like_count),
        escape(&info.comment_count),
        escape(&info.repost_count),
        escape(&info.view_count),
    );
    let _ = writeln!(
        html,
        r#"<a class="download" href="/download/{}">Download video</a>"#,
        escape(&info.file)
    );
    html.push_str("</section>\n");
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> VideoInfo {
        VideoInfo {
            title: "<b>dance</b>".to_string(),
            duration: 15,
            uploader: "someone".to_string(),
            like_count: "1.5K".to_string(),
            comment_count: "3".to_string(),
            repost_count: "0".to_string(),
            view_count: "2.3M".to_string(),
            thumbnail: Some("https://p16.example/a.jpg?x=1&y=2".to_string()),
            file: "abc.mp4".to_string(),
        }
    }

    #[test]
    fn empty_page_has_form_only() {
        let html = render_page(None);
        assert!(html.contains(r#"name="url""#));
        assert!(!html.contains("class=\"error\""));
        assert!(!html.contains("class=\"result\""));
    }

    #[test]
    fn success_links_to_download() {
        let html = render_page(Some(&VideoResult::Ready(info())));
        assert!(html.contains(r#"href="/download/abc.mp4""#));
        assert!(html.contains("Likes: 1.5K"));
        assert!(html.contains("Views: 2.3M"));
    }

    #[test]
    fn interpolated_text_is_escaped() {
        let html = render_page(Some(&VideoResult::Ready(info())));
        assert!(html.contains("&lt;b&gt;dance&lt;/b&gt;"));
        assert!(html.contains("a.jpg?x=1&amp;y=2"));
        assert!(!html.contains("<b>dance</b>"));
    }

    #[test]
    fn error_is_rendered() {
        let html = render_page(Some(&VideoResult::failed("Invalid TikTok URL")));
        assert!(html.contains(r#"<p class="error">Invalid TikTok URL</p>"#));
    }
}
