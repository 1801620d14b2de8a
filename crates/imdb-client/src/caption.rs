//! HTML caption for a chosen title
//!
//! The caption is an ordered list of independent fragments. Each fragment
//! builder returns `None` when the data it needs is missing, in which case
//! the line is left out; otherwise the line is appended followed by `\n`.
//! Rendering is pure: the same document always yields the same caption.

use imdb_types::DetailDocument;
use imdb_types::detail::{MainInfo, PersonName, ShortInfo};

const IMDB_BASE_URL: &str = "https://imdb.com";

/// People inspected per credit line (directors, writers, cast).
pub const CREDIT_LIST_CAP: usize = 6;

/// Synopsis length limit, in characters.
pub const SYNOPSIS_MAX_CHARS: usize = 750;

/// Builds one caption line, or `None` to omit it.
pub type FragmentBuilder = fn(&CaptionContext<'_>) -> Option<String>;

/// Caption lines in display order.
pub const CAPTION_FRAGMENTS: &[(&str, FragmentBuilder)] = &[
    ("header", header),
    ("ratings", ratings),
    ("imdb_id", imdb_id),
    ("duration", duration),
    ("release_date", release_date),
    ("languages", languages),
    ("genres", genres),
    ("synopsis", synopsis),
    ("directors", directors),
    ("writers", writers),
    ("cast", cast),
];

/// Telegram-HTML caption text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCaption {
    pub html: String,
}

impl RenderedCaption {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

/// Read-only view over a detail document used by the fragment builders.
pub struct CaptionContext<'a> {
    doc: &'a DetailDocument,
    imdb_id: &'a str,
    title_url: String,
}

impl<'a> CaptionContext<'a> {
    pub fn new(doc: &'a DetailDocument, requested_id: &'a str) -> Self {
        let imdb_id = doc
            .imdb_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or(requested_id);

        Self {
            doc,
            imdb_id,
            title_url: format!("{}/title/{}", IMDB_BASE_URL, imdb_id),
        }
    }

    fn short(&self) -> Option<&'a ShortInfo> {
        self.doc.short.as_ref()
    }

    fn main(&self) -> Option<&'a MainInfo> {
        self.doc.main.as_ref()
    }

    fn title(&self) -> Option<&'a str> {
        self.doc
            .fake
            .as_ref()
            .map(|f| f.title.as_str())
            .filter(|t| !t.trim().is_empty())
            .or_else(|| non_blank(self.short()?.name.as_deref()))
    }

    fn year(&self) -> Option<i32> {
        self.doc.fake.as_ref()?.year.filter(|y| *y != 0)
    }

    fn poster(&self) -> Option<&'a str> {
        self.doc
            .fake
            .as_ref()
            .and_then(|f| f.poster())
            .or_else(|| non_blank(self.short()?.image.as_deref()))
    }

    fn is_adult(&self) -> bool {
        self.main().and_then(|m| m.is_adult).unwrap_or(false)
    }
}

/// Render the caption for `doc`, requested as `requested_id`.
pub fn render_caption(doc: &DetailDocument, requested_id: &str) -> RenderedCaption {
    let ctx = CaptionContext::new(doc, requested_id);

    let mut html = String::new();
    for (_, build) in CAPTION_FRAGMENTS {
        if let Some(fragment) = build(&ctx) {
            html.push_str(&fragment);
            html.push('\n');
        }
    }

    RenderedCaption { html }
}

// ── Fragments ─────────────────────────────────────────────────────────────────

fn header(ctx: &CaptionContext<'_>) -> Option<String> {
    let emoji = if ctx.is_adult() { "🔞" } else { "🎪" };

    let mut line = match ctx.poster() {
        Some(poster) => format!("<a href='{}'>{}</a>", escape_attr(poster), emoji),
        None => emoji.to_string(),
    };

    if let Some(title) = ctx.title() {
        match ctx.short().and_then(|s| non_blank(s.kind.as_deref())) {
            Some(kind) => line.push_str(&format!(" <b>{}</b>: ", escape_text(kind))),
            None => line.push(' '),
        }
        line.push_str(&format!(
            "<a href='{}'>{}</a>",
            escape_attr(&ctx.title_url),
            escape_text(title)
        ));
    }

    if let Some(year) = ctx.year() {
        line.push_str(&format!(" <i>({})</i> ", year));
    }

    Some(line)
}

fn ratings(ctx: &CaptionContext<'_>) -> Option<String> {
    let short = ctx.short()?;
    let mut line = String::new();

    if let Some((value, best, count)) = short.aggregate_rating.as_ref().and_then(|r| {
        r.rating_value
            .map(|v| (v, r.best_rating.unwrap_or(10.0), r.rating_count.unwrap_or(0)))
    }) {
        line.push_str(&format!(
            "🏆 <b>Usᴇʀ Rᴀᴛɪɴɢs</b>: <b>{} / {}</b>  <code>({} based on {} user ratings)</code>",
            value, best, value, count
        ));
    }

    if let Some(content_rating) = non_blank(short.content_rating.as_deref()) {
        line.push_str(&format!(" | <code>{}</code>", escape_text(content_rating)));
    }

    (!line.is_empty()).then_some(line)
}

fn imdb_id(ctx: &CaptionContext<'_>) -> Option<String> {
    Some(format!(
        "🚦 <b>𝙸ᴍᴅʙ 𝙸ᴅ</b>: <code>{}</code>",
        escape_text(ctx.imdb_id)
    ))
}

fn duration(ctx: &CaptionContext<'_>) -> Option<String> {
    let seconds = ctx
        .main()
        .and_then(MainInfo::runtime_seconds)
        .or_else(|| parse_iso_duration(ctx.short()?.duration.as_deref()?))
        .filter(|s| *s > 0)?;

    let (clock, minutes) = runtime_text(seconds);
    Some(format!(
        "🕰<b>Dᴜʀᴀᴛɪᴏɴ</b>: <code>{}</code> | <b>{}</b>",
        clock, minutes
    ))
}

fn release_date(ctx: &CaptionContext<'_>) -> Option<String> {
    let date = non_blank(ctx.short()?.date_published.as_deref())?;
    Some(format!(
        "🗓️ <b>Rᴇʟᴇᴀsᴇ Dᴀᴛᴇ</b>: <a href='{}/releaseinfo'>{}</a>",
        escape_attr(&ctx.title_url),
        escape_text(date)
    ))
}

fn languages(ctx: &CaptionContext<'_>) -> Option<String> {
    let tags: String = ctx
        .main()?
        .languages()
        .filter(|l| !l.trim().is_empty())
        .map(|l| format!("#{} ", escape_text(l)))
        .collect();

    (!tags.is_empty()).then(|| format!("💬 <b>Lᴀɴɢᴜᴀɢᴇ</b>: {}", tags))
}

fn genres(ctx: &CaptionContext<'_>) -> Option<String> {
    let genres = &ctx.short()?.genre;
    if genres.is_empty() {
        return None;
    }

    let tags: Vec<String> = genres.iter().map(|g| escape_text(g)).collect();
    Some(format!("📟 <b>Gᴇɴʀᴇ</b>: #{}", tags.join(" #")))
}

fn synopsis(ctx: &CaptionContext<'_>) -> Option<String> {
    let description = non_blank(ctx.short()?.description.as_deref())?;
    let excerpt: String = description.chars().take(SYNOPSIS_MAX_CHARS).collect();

    Some(format!(
        "📋 <b>Sᴛᴏʀy Lɪɴᴇ</b>: <tg-spoiler>{} <a href='{}/plotsummary/'>...</a></tg-spoiler>",
        escape_text(&excerpt),
        escape_attr(&ctx.title_url)
    ))
}

fn directors(ctx: &CaptionContext<'_>) -> Option<String> {
    credit_line("🎥 <b>Dɪʀᴇᴄᴛᴏʀ</b>: ", &ctx.main()?.director_names())
}

fn writers(ctx: &CaptionContext<'_>) -> Option<String> {
    credit_line("✍️ <b>Wʀɪᴛᴇʀ</b>: ", &ctx.main()?.writer_names())
}

fn cast(ctx: &CaptionContext<'_>) -> Option<String> {
    credit_line("🎎 <b>Aᴄᴛᴏʀs</b>: ", &ctx.main()?.cast_names())
}

/// Link the first [`CREDIT_LIST_CAP`] entries; nameless entries still use up a slot.
fn credit_line(label: &str, people: &[Option<&PersonName>]) -> Option<String> {
    let links: String = people
        .iter()
        .take(CREDIT_LIST_CAP)
        .filter_map(|person| {
            let person = (*person)?;
            let name = person.display().filter(|n| !n.trim().is_empty())?;
            Some(format!(
                "<a href='{}/name/{}/'>{}</a> ",
                IMDB_BASE_URL,
                escape_attr(&person.id),
                escape_text(name)
            ))
        })
        .collect();

    (!links.is_empty()).then(|| format!("{}{}", label, links))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `("{h}h {m}min", "{total}min")` for a runtime in seconds.
pub fn runtime_text(seconds: u64) -> (String, String) {
    let total_minutes = seconds / 60;
    (
        format!("{}h {}min", total_minutes / 60, total_minutes % 60),
        format!("{}min", total_minutes),
    )
}

/// Seconds in an ISO-8601 duration such as `PT2H16M` or `P1DT30M`.
pub fn parse_iso_duration(raw: &str) -> Option<u64> {
    let rest = raw.trim().strip_prefix('P')?;

    let mut total = 0u64;
    let mut digits = String::new();
    let mut seen_unit = false;

    for c in rest.chars() {
        match c {
            'T' if digits.is_empty() => {}
            '0'..='9' => digits.push(c),
            'D' | 'H' | 'M' | 'S' => {
                let n: u64 = digits.parse().ok()?;
                digits.clear();
                let unit = match c {
                    'D' => 86_400,
                    'H' => 3_600,
                    'M' => 60,
                    _ => 1,
                };
                total = total.checked_add(n.checked_mul(unit)?)?;
                seen_unit = true;
            }
            _ => return None,
        }
    }

    (seen_unit && digits.is_empty()).then_some(total)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Escape `&`, `<`, `>` for Telegram HTML text.
fn escape_text(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    escape_to(&mut output, text, false);
    output
}

/// Escape a value placed inside a single-quoted attribute.
fn escape_attr(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    escape_to(&mut output, text, true);
    output
}

fn escape_to(output: &mut String, text: &str, quote: bool) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\'' if quote => output.push_str("&#39;"),
            _ => output.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATRIX: &str = r##"{
        "imdbId": "tt0133093",
        "fake": {
            "#TITLE": "The Matrix",
            "#YEAR": 1999,
            "#IMDB_ID": "tt0133093",
            "#IMG_POSTER": "https://img.example/matrix.jpg"
        },
        "short": {
            "@type": "Movie",
            "name": "The Matrix",
            "description": "A hacker learns the truth.",
            "aggregateRating": {"ratingValue": 8.7, "bestRating": 10, "ratingCount": 2100000},
            "contentRating": "R",
            "genre": ["Action", "Sci-Fi"],
            "datePublished": "1999-03-31",
            "duration": "PT2H16M"
        },
        "main": {
            "isAdult": false,
            "runtime": {"seconds": 8160},
            "spokenLanguages": {"spokenLanguages": [{"id": "en", "text": "English"}]},
            "directors": [{"credits": [
                {"name": {"id": "nm0905154", "nameText": {"text": "Lana Wachowski"}}},
                {"name": {"id": "nm0905152", "nameText": {"text": "Lilly Wachowski"}}}
            ]}],
            "writers": [{"credits": [
                {"name": {"id": "nm0905152", "nameText": {"text": "Lilly Wachowski"}}}
            ]}],
            "cast": {"edges": [
                {"node": {"name": {"id": "nm0000206", "nameText": {"text": "Keanu Reeves"}}}},
                {"node": {"name": {"id": "nm0000401", "nameText": {"text": "Laurence Fishburne"}}}}
            ]}
        }
    }"##;

    fn matrix() -> DetailDocument {
        serde_json::from_str(MATRIX).unwrap()
    }

    fn person(id: &str, name: &str) -> serde_json::Value {
        serde_json::json!({"node": {"name": {"id": id, "nameText": {"text": name}}}})
    }

    #[test]
    fn renders_full_caption() {
        let caption = render_caption(&matrix(), "tt0133093");

        let expected = concat!(
            "<a href='https://img.example/matrix.jpg'>🎪</a> <b>Movie</b>: ",
            "<a href='https://imdb.com/title/tt0133093'>The Matrix</a> <i>(1999)</i> \n",
            "🏆 <b>Usᴇʀ Rᴀᴛɪɴɢs</b>: <b>8.7 / 10</b>  ",
            "<code>(8.7 based on 2100000 user ratings)</code> | <code>R</code>\n",
            "🚦 <b>𝙸ᴍᴅʙ 𝙸ᴅ</b>: <code>tt0133093</code>\n",
            "🕰<b>Dᴜʀᴀᴛɪᴏɴ</b>: <code>2h 16min</code> | <b>136min</b>\n",
            "🗓️ <b>Rᴇʟᴇᴀsᴇ Dᴀᴛᴇ</b>: ",
            "<a href='https://imdb.com/title/tt0133093/releaseinfo'>1999-03-31</a>\n",
            "💬 <b>Lᴀɴɢᴜᴀɢᴇ</b>: #English \n",
            "📟 <b>Gᴇɴʀᴇ</b>: #Action #Sci-Fi\n",
            "📋 <b>Sᴛᴏʀy Lɪɴᴇ</b>: <tg-spoiler>A hacker learns the truth. ",
            "<a href='https://imdb.com/title/tt0133093/plotsummary/'>...</a></tg-spoiler>\n",
            "🎥 <b>Dɪʀᴇᴄᴛᴏʀ</b>: <a href='https://imdb.com/name/nm0905154/'>Lana Wachowski</a> ",
            "<a href='https://imdb.com/name/nm0905152/'>Lilly Wachowski</a> \n",
            "✍️ <b>Wʀɪᴛᴇʀ</b>: <a href='https://imdb.com/name/nm0905152/'>Lilly Wachowski</a> \n",
            "🎎 <b>Aᴄᴛᴏʀs</b>: <a href='https://imdb.com/name/nm0000206/'>Keanu Reeves</a> ",
            "<a href='https://imdb.com/name/nm0000401/'>Laurence Fishburne</a> \n",
        );
        assert_eq!(caption.html, expected);
    }

    #[test]
    fn each_optional_field_toggles_only_its_line() {
        let cases: [(&str, fn(&mut DetailDocument)); 9] = [
            ("🏆", |d: &mut DetailDocument| {
                let short = d.short.as_mut().unwrap();
                short.aggregate_rating = None;
                short.content_rating = None;
            }),
            ("🕰", |d: &mut DetailDocument| {
                d.main.as_mut().unwrap().runtime = None;
                d.short.as_mut().unwrap().duration = None;
            }),
            ("🗓️", |d: &mut DetailDocument| d.short.as_mut().unwrap().date_published = None),
            ("💬", |d: &mut DetailDocument| d.main.as_mut().unwrap().spoken_languages = None),
            ("📟", |d: &mut DetailDocument| d.short.as_mut().unwrap().genre.clear()),
            ("📋", |d: &mut DetailDocument| d.short.as_mut().unwrap().description = None),
            ("🎥", |d: &mut DetailDocument| d.main.as_mut().unwrap().directors.clear()),
            ("✍️", |d: &mut DetailDocument| d.main.as_mut().unwrap().writers.clear()),
            ("🎎", |d: &mut DetailDocument| d.main.as_mut().unwrap().cast = None),
        ];

        let full = render_caption(&matrix(), "tt0133093");

        for (prefix, strip) in cases {
            let mut doc = matrix();
            strip(&mut doc);
            let stripped = render_caption(&doc, "tt0133093");

            let expected: Vec<&str> = full.html.lines().filter(|l| !l.starts_with(prefix)).collect();
            let actual: Vec<&str> = stripped.html.lines().collect();

            assert_eq!(expected.len() + 1, full.html.lines().count(), "{prefix} line missing from full caption");
            assert_eq!(actual, expected, "removing {prefix} must drop exactly its line");
        }
    }

    #[test]
    fn missing_genre_drops_genre_line() {
        let mut doc = matrix();
        doc.short.as_mut().unwrap().genre.clear();

        let caption = render_caption(&doc, "tt0133093");

        assert!(!caption.html.contains("Gᴇɴʀᴇ"));
    }

    #[test]
    fn empty_document_keeps_header_and_id() {
        let caption = render_caption(&DetailDocument::default(), "tt0000001");

        assert_eq!(caption.html, "🎪\n🚦 <b>𝙸ᴍᴅʙ 𝙸ᴅ</b>: <code>tt0000001</code>\n");
    }

    #[test]
    fn adult_titles_use_adult_emoji() {
        let mut doc = matrix();
        doc.main.as_mut().unwrap().is_adult = Some(true);

        let caption = render_caption(&doc, "tt0133093");

        assert!(caption.html.starts_with("<a href='https://img.example/matrix.jpg'>🔞</a>"));
    }

    #[test]
    fn header_falls_back_to_short_block() {
        let mut doc = matrix();
        doc.fake = None;
        doc.short.as_mut().unwrap().image = Some("https://img.example/short.jpg".to_string());

        let caption = render_caption(&doc, "tt0133093");
        let header = caption.html.lines().next().unwrap();

        assert_eq!(
            header,
            "<a href='https://img.example/short.jpg'>🎪</a> <b>Movie</b>: \
             <a href='https://imdb.com/title/tt0133093'>The Matrix</a>"
        );
    }

    #[test]
    fn content_rating_alone_keeps_ratings_line() {
        let mut doc = matrix();
        doc.short.as_mut().unwrap().aggregate_rating = None;

        let caption = render_caption(&doc, "tt0133093");

        assert!(caption.html.contains("\n | <code>R</code>\n"));
    }

    #[test]
    fn credit_lines_are_capped() {
        let mut doc = matrix();
        let edges: Vec<serde_json::Value> = (0..10)
            .map(|i| person(&format!("nm{:07}", i), &format!("Actor {}", i)))
            .collect();
        doc.main.as_mut().unwrap().cast =
            serde_json::from_value(serde_json::json!({ "edges": edges })).unwrap();

        let caption = render_caption(&doc, "tt0133093");
        let cast_line = caption.html.lines().find(|l| l.starts_with("🎎")).unwrap();

        assert_eq!(cast_line.matches("<a href=").count(), CREDIT_LIST_CAP);
        assert!(cast_line.contains("Actor 5"));
        assert!(!cast_line.contains("Actor 6"));
    }

    #[test]
    fn nameless_credits_use_up_a_slot() {
        let mut doc = matrix();
        let mut edges = vec![serde_json::json!({"node": null}); 5];
        edges.push(person("nm0000206", "Keanu Reeves"));
        edges.push(person("nm0000401", "Laurence Fishburne"));
        doc.main.as_mut().unwrap().cast =
            serde_json::from_value(serde_json::json!({ "edges": edges })).unwrap();

        let caption = render_caption(&doc, "tt0133093");
        let cast_line = caption.html.lines().find(|l| l.starts_with("🎎")).unwrap();

        assert!(cast_line.contains("Keanu Reeves"));
        assert!(!cast_line.contains("Laurence Fishburne"));
    }

    #[test]
    fn credits_without_names_drop_the_line() {
        let mut doc = matrix();
        doc.main.as_mut().unwrap().cast =
            serde_json::from_value(serde_json::json!({"edges": [{"node": null}]})).unwrap();

        let caption = render_caption(&doc, "tt0133093");

        assert!(!caption.html.contains("Aᴄᴛᴏʀs"));
    }

    #[test]
    fn synopsis_is_truncated_by_characters() {
        let mut doc = matrix();
        doc.short.as_mut().unwrap().description = Some("é".repeat(SYNOPSIS_MAX_CHARS + 50));

        let caption = render_caption(&doc, "tt0133093");
        let line = caption.html.lines().find(|l| l.starts_with("📋")).unwrap();

        assert_eq!(line.matches('é').count(), SYNOPSIS_MAX_CHARS);
    }

    #[test]
    fn text_is_html_escaped() {
        let mut doc = matrix();
        doc.fake.as_mut().unwrap().title = "Tom & Jerry <3".to_string();
        doc.short.as_mut().unwrap().genre = vec!["R&B".to_string()];

        let caption = render_caption(&doc, "tt0133093");

        assert!(caption.html.contains(">Tom &amp; Jerry &lt;3</a>"));
        assert!(caption.html.contains("#R&amp;B"));
    }

    #[test]
    fn poster_url_quotes_are_escaped() {
        let mut doc = matrix();
        doc.fake.as_mut().unwrap().img_poster = Some("https://img.example/it's.jpg".to_string());

        let caption = render_caption(&doc, "tt0133093");

        assert!(caption.html.starts_with("<a href='https://img.example/it&#39;s.jpg'>"));
    }

    #[test]
    fn document_id_wins_over_requested_id() {
        let caption = render_caption(&matrix(), "tt9999999");
        assert!(caption.html.contains("<code>tt0133093</code>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let doc = matrix();
        assert_eq!(render_caption(&doc, "tt0133093"), render_caption(&doc, "tt0133093"));
    }

    #[test]
    fn runtime_text_uses_true_modulo() {
        assert_eq!(runtime_text(3725), ("1h 2min".to_string(), "62min".to_string()));
        assert_eq!(runtime_text(8160), ("2h 16min".to_string(), "136min".to_string()));
        assert_eq!(runtime_text(59), ("0h 0min".to_string(), "0min".to_string()));
        assert_eq!(runtime_text(7200), ("2h 0min".to_string(), "120min".to_string()));
    }

    #[test]
    fn duration_falls_back_to_iso_string() {
        let mut doc = matrix();
        doc.main.as_mut().unwrap().runtime = None;
        doc.short.as_mut().unwrap().duration = Some("PT1H45M".to_string());

        let caption = render_caption(&doc, "tt0133093");

        assert!(caption.html.contains("<code>1h 45min</code> | <b>105min</b>"));
    }

    #[test]
    fn zero_runtime_is_omitted() {
        let mut doc = matrix();
        doc.main.as_mut().unwrap().runtime = serde_json::from_str(r#"{"seconds": 0}"#).unwrap();
        doc.short.as_mut().unwrap().duration = None;

        let caption = render_caption(&doc, "tt0133093");

        assert!(!caption.html.contains("Dᴜʀᴀᴛɪᴏɴ"));
    }

    #[test]
    fn parses_iso_durations() {
        assert_eq!(parse_iso_duration("PT2H16M"), Some(8160));
        assert_eq!(parse_iso_duration("PT45M"), Some(2700));
        assert_eq!(parse_iso_duration("PT1H2M5S"), Some(3725));
        assert_eq!(parse_iso_duration("P1DT30M"), Some(88_200));
        assert_eq!(parse_iso_duration("PT"), None);
        assert_eq!(parse_iso_duration("2h"), None);
        assert_eq!(parse_iso_duration("PT5"), None);
        assert_eq!(parse_iso_duration("PTxM"), None);
    }
}
