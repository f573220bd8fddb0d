//! Server-rendered HTML pages
//!
//! One page serves the whole UI: the stored-document list, an upload form,
//! and an ask form. After a question is answered the same page is rendered
//! again with the answer block filled in.

/// Escape text for safe interpolation into HTML.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the document listing page, optionally with an answer block.
pub fn index_page(documents: &[String], answer: Option<&AnswerBlock>) -> String {
    let document_items = if documents.is_empty() {
        "<li class=\"empty\">No documents uploaded yet.</li>".to_string()
    } else {
        documents
            .iter()
            .map(|name| format!("<li><code>{}</code></li>", escape_html(name)))
            .collect::<Vec<_>>()
            .join("\n            ")
    };

    let document_options = documents
        .iter()
        .map(|name| {
            let escaped = escape_html(name);
            format!("<option value=\"{escaped}\">{escaped}</option>")
        })
        .collect::<Vec<_>>()
        .join("\n                ");

    let answer_section = match answer {
        Some(block) => format!(
            r#"<div class="answer">
        <h3>Answer</h3>
        <p class="question">{document} &mdash; &ldquo;{question}&rdquo;</p>
        <div class="answer-body">{answer}</div>
    </div>"#,
            document = escape_html(&block.document),
            question = escape_html(&block.question),
            answer = escape_html(&block.answer),
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Askdoc</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 720px;
            margin: 0 auto;
            padding: 40px 20px;
            color: #222;
        }}
        h1 {{ margin-bottom: 4px; }}
        h2 {{ color: #666; font-weight: 400; font-size: 1.1em; margin-top: 0; }}
        form {{ margin: 20px 0; padding: 16px; background: #f6f6f8; border-radius: 8px; }}
        label {{ display: block; margin-bottom: 6px; }}
        input[type="text"], select {{ width: 100%; padding: 6px; margin-bottom: 10px; }}
        .answer {{ background: #eef6ee; border-left: 4px solid #4a4; border-radius: 8px; padding: 16px; }}
        .answer-body {{ white-space: pre-wrap; }}
        .question {{ color: #666; font-style: italic; }}
        code {{ background: #eee; padding: 2px 6px; border-radius: 4px; }}
        li.empty {{ color: #999; }}
    </style>
</head>
<body>
    <h1>Askdoc</h1>
    <h2>Upload a document, then ask it a question</h2>

    {answer_section}

    <h3>Documents</h3>
    <ul>
            {document_items}
    </ul>

    <form action="/upload" method="post" enctype="multipart/form-data">
        <label for="file">Upload a document (PDF, DOCX, PPTX, XLSX, CSV)</label>
        <input type="file" id="file" name="file" required>
        <button type="submit">Upload</button>
    </form>

    <form action="/ask" method="post">
        <label for="documentName">Document</label>
        <select id="documentName" name="documentName" required>
                {document_options}
        </select>
        <label for="question">Question</label>
        <input type="text" id="question" name="question" required>
        <button type="submit">Ask</button>
    </form>
</body>
</html>"#
    )
}

/// Everything needed to show an answered question.
pub struct AnswerBlock {
    pub document: String,
    pub question: String,
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(
            escape_html(r#"<b>&"quoted"'</b>"#),
            "&lt;b&gt;&amp;&quot;quoted&quot;&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn index_lists_documents_and_options() {
        let docs = vec!["a.pdf".to_string(), "b & c.csv".to_string()];
        let html = index_page(&docs, None);

        assert!(html.contains("<code>a.pdf</code>"));
        assert!(html.contains("b &amp; c.csv"));
        assert!(html.contains("<option value=\"a.pdf\">"));
        assert!(!html.contains("class=\"answer\""));
    }

    #[test]
    fn index_renders_answer_block_when_present() {
        let block = AnswerBlock {
            document: "a.pdf".to_string(),
            question: "why?".to_string(),
            answer: "<because>".to_string(),
        };
        let html = index_page(&["a.pdf".to_string()], Some(&block));

        assert!(html.contains("class=\"answer\""));
        assert!(html.contains("&lt;because&gt;"));
        assert!(html.contains("why?"));
    }

    #[test]
    fn empty_store_shows_placeholder() {
        let html = index_page(&[], None);
        assert!(html.contains("No documents uploaded yet."));
    }
}
