//! Text rendering of an APOD record.

use crate::domain::ApodRecord;

/// Returned whenever the upstream call yields nothing usable.
pub const UNAVAILABLE: &str = "Unable to fetch APOD data from NASA API.";

const UNKNOWN: &str = "Unknown";
const DEFAULT_AUTHOR: &str = "NASA";
const NO_EXPLANATION: &str = "No explanation available";
const NO_IMAGE: &str = "No image available";
const DEFAULT_ALT: &str = "NASA APOD";

pub fn render(rec: &ApodRecord) -> String {
    let title = rec.title.as_deref().unwrap_or(UNKNOWN);
    let image = match rec.image_url() {
        Some(url) => {
            let alt = rec.title.as_deref().unwrap_or(DEFAULT_ALT);
            format!("![{alt}]({url})")
        }
        None => NO_IMAGE.to_string(),
    };

    format!(
        "\n🌌 NASA Astronomy Picture of the Day\n\n\
         📅 Date: {date}\n\
         📝 Title: {title}\n\
         👨‍🚀 Author: {author}\n\
         📖 Explanation: {explanation}\n\n\
         {image}\n",
        date = rec.date.as_deref().unwrap_or(UNKNOWN),
        author = rec.copyright.as_deref().unwrap_or(DEFAULT_AUTHOR),
        explanation = rec.explanation.as_deref().unwrap_or(NO_EXPLANATION),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horsehead() -> ApodRecord {
        ApodRecord {
            date: Some("2020-01-01".into()),
            title: Some("Horsehead".into()),
            url: Some("http://x/y.jpg".into()),
            ..Default::default()
        }
    }

    #[test]
    fn renders_placeholders_for_missing_fields() {
        let out = render(&horsehead());
        assert!(out.contains("📅 Date: 2020-01-01\n"));
        assert!(out.contains("📝 Title: Horsehead\n"));
        assert!(out.contains("👨‍🚀 Author: NASA\n"));
        assert!(out.contains("📖 Explanation: No explanation available\n"));
        assert!(out.contains("![Horsehead](http://x/y.jpg)"));
    }

    #[test]
    fn renders_exact_layout() {
        let rec = ApodRecord {
            date: Some("2021-06-01".into()),
            title: Some("M1".into()),
            copyright: Some("Jane Doe".into()),
            explanation: Some("A nebula.".into()),
            url: Some("http://x/s.jpg".into()),
            hdurl: Some("http://x/h.jpg".into()),
        };
        let expected = "\n🌌 NASA Astronomy Picture of the Day\n\n\
                        📅 Date: 2021-06-01\n\
                        📝 Title: M1\n\
                        👨‍🚀 Author: Jane Doe\n\
                        📖 Explanation: A nebula.\n\n\
                        ![M1](http://x/h.jpg)\n";
        assert_eq!(render(&rec), expected);
    }

    #[test]
    fn no_image_when_both_urls_missing() {
        let rec = ApodRecord {
            date: Some("2020-01-02".into()),
            title: Some("Video day".into()),
            ..Default::default()
        };
        let out = render(&rec);
        assert!(out.ends_with("\nNo image available\n"));
        assert!(!out.contains("!["));
    }

    #[test]
    fn untitled_image_uses_default_alt() {
        let rec = ApodRecord {
            hdurl: Some("http://x/h.jpg".into()),
            ..Default::default()
        };
        let out = render(&rec);
        assert!(out.contains("📝 Title: Unknown\n"));
        assert!(out.contains("📅 Date: Unknown\n"));
        assert!(out.contains("![NASA APOD](http://x/h.jpg)"));
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(render(&horsehead()), render(&horsehead()));
    }
}
