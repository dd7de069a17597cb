/// Split a markdown document into raw slide strings.
///
/// A slide break is any of:
/// 1. a `---` line with blank lines on both sides
/// 2. three or more consecutive blank lines
/// 3. a `# ` heading when the current slide already has content
///
/// Headings inside fenced code blocks never break a slide.
pub fn split(body: &str) -> Vec<String> {
    let body = body.replace("\r\n", "\n");
    let lines: Vec<&str> = body.split('\n').collect();

    let mut chunks: Vec<Vec<&str>> = vec![Vec::new()];
    let mut blank_run = 0;
    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if is_dash_separator(trimmed) {
            let prev_blank = i == 0 || lines[i - 1].trim().is_empty();
            let next_blank = lines.get(i + 1).is_none_or(|l| l.trim().is_empty());
            if prev_blank && next_blank {
                chunks.push(Vec::new());
                blank_run = 0;
                continue;
            }
        }

        if trimmed.is_empty() {
            blank_run += 1;
            if blank_run == 3 {
                chunks.push(Vec::new());
            }
            if blank_run >= 3 {
                continue;
            }
        } else {
            blank_run = 0;
        }

        if let Some(chunk) = chunks.last_mut() {
            chunk.push(line);
        }
    }

    let mut slides = Vec::new();
    for chunk in chunks {
        let text = chunk.join("\n");
        let text = text.trim();
        if !text.is_empty() {
            split_by_heading(text, &mut slides);
        }
    }
    slides
}

/// Break a chunk before every `# ` heading that follows content.
fn split_by_heading(chunk: &str, slides: &mut Vec<String>) {
    let mut current = String::new();
    let mut has_content = false;
    let mut fence: Option<(char, usize)> = None;

    for line in chunk.lines() {
        let trimmed = line.trim();

        match fence {
            Some((ch, len)) => {
                let run = trimmed.chars().take_while(|&c| c == ch).count();
                if run >= len && trimmed.chars().skip(run).all(char::is_whitespace) {
                    fence = None;
                }
            }
            None => {
                if let Some(ch) = trimmed.chars().next().filter(|c| *c == '`' || *c == '~') {
                    let run = trimmed.chars().take_while(|&c| c == ch).count();
                    if run >= 3 {
                        fence = Some((ch, run));
                    }
                }
                if line.starts_with("# ") && has_content {
                    slides.push(current.trim().to_string());
                    current.clear();
                    has_content = false;
                }
            }
        }

        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
        if !trimmed.is_empty() {
            has_content = true;
        }
    }

    let text = current.trim();
    if !text.is_empty() {
        slides.push(text.to_string());
    }
}

fn is_dash_separator(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_split() {
        let slides = split("Slide one\n\n\n\nSlide two");
        assert_eq!(slides, vec!["Slide one", "Slide two"]);
    }

    #[test]
    fn test_two_blank_lines_do_not_split() {
        let slides = split("Para one\n\n\nPara two");
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_dash_separator() {
        let slides = split("Slide one\n\n---\n\nSlide two");
        assert_eq!(slides, vec!["Slide one", "Slide two"]);
    }

    #[test]
    fn test_dash_without_blank_lines_is_content() {
        let slides = split("Heading\n---\nBody");
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_heading_inference() {
        let slides = split("# First\n\nContent\n\n# Second\n\nMore content");
        assert_eq!(slides.len(), 2);
        assert!(slides[0].starts_with("# First"));
        assert!(slides[1].starts_with("# Second"));
    }

    #[test]
    fn test_h2_no_split() {
        let slides = split("# Title\n\n## Subtitle\n\nContent");
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_combined_separators() {
        // Overlapping separators make a single break.
        let slides = split("Slide one\n\n\n\n---\n\n\n\nSlide two");
        assert_eq!(slides.len(), 2);
    }

    #[test]
    fn test_heading_in_code_block_no_split() {
        let body = "# Title\n\n```python\n# this is a comment\nprint('hi')\n```";
        assert_eq!(split(body).len(), 1, "hash comment in code block should not split");
    }

    #[test]
    fn test_crlf() {
        let slides = split("One\r\n\r\n---\r\n\r\nTwo");
        assert_eq!(slides, vec!["One", "Two"]);
    }

    #[test]
    fn test_empty() {
        assert!(split("").is_empty());
        assert!(split("\n\n---\n\n").is_empty());
    }
}
