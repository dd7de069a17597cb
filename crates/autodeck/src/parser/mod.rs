pub mod splitter;

/// A loaded slide deck. The slide count is fixed once parsed.
#[derive(Debug, Clone, Default)]
pub struct Presentation {
    pub title: Option<String>,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    /// Text of the first heading, without the leading `#`s.
    pub heading: Option<String>,
    /// Everything except the first heading, trimmed.
    pub body: String,
}

pub fn parse(content: &str) -> Presentation {
    let slides: Vec<Slide> = splitter::split(content)
        .iter()
        .map(|raw| parse_slide(raw))
        .collect();
    let title = slides.first().and_then(|s| s.heading.clone());
    Presentation { title, slides }
}

fn parse_slide(raw: &str) -> Slide {
    let mut heading = None;
    let mut body = Vec::new();
    for line in raw.lines() {
        if heading.is_none() && body.iter().all(|l: &&str| l.trim().is_empty()) {
            if let Some(text) = heading_text(line) {
                heading = Some(text.to_string());
                continue;
            }
        }
        body.push(line);
    }
    Slide {
        heading,
        body: body.join("\n").trim().to_string(),
    }
}

fn heading_text(line: &str) -> Option<&str> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    rest.starts_with(' ').then(|| rest.trim())
}
