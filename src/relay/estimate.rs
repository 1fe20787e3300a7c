use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lower bound for a model-provided estimate
pub const MIN_MINUTES: u32 = 5;
/// Upper bound for a model-provided estimate (8 hours)
pub const MAX_MINUTES: u32 = 480;

const FALLBACK_PRINCIPLES: &str = "Based on task complexity estimation";
const FALLBACK_STEP: &str = "Complete the task";

/// Instructions sent as the system message
pub const SYSTEM_PROMPT: &str = r#"You estimate how long a single task takes, reasoning from first principles.

Reduce the task to the fundamental pieces of work it requires, size each piece,
and produce a short ordered plan.

Reply with one JSON object and nothing else:
{"minutes": <integer>, "firstPrinciples": "<one or two sentences>", "steps": ["<step>", "..."]}

Example:
Task: Prepare quarterly budget review
{"minutes": 120, "firstPrinciples": "A budget review needs current numbers, a comparison against plan and a written summary of variances.", "steps": ["Export actuals (20 min)", "Compare against plan (45 min)", "Write variance notes (40 min)", "Send for review (15 min)"]}"#;

/// Time estimate with the analysis behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub minutes: u32,
    #[serde(default)]
    pub first_principles: String,
    #[serde(default)]
    pub steps: Vec<String>,
}

impl Estimate {
    /// Analysis as optional task fields (empty values dropped)
    pub fn into_analysis(self) -> (Option<String>, Option<Vec<String>>) {
        let fp = Some(self.first_principles).filter(|s| !s.trim().is_empty());
        let steps = Some(self.steps).filter(|s| !s.is_empty());
        (fp, steps)
    }
}

/// Whitespace-separated words in the trimmed title
pub fn word_count(title: &str) -> usize {
    title.split_whitespace().count()
}

/// Heuristic used whenever the model reply cannot be used
pub fn fallback_estimate(title: &str) -> Estimate {
    let minutes = (word_count(title) as u32).saturating_mul(10).clamp(15, 60);
    Estimate {
        minutes,
        first_principles: FALLBACK_PRINCIPLES.to_string(),
        steps: vec![FALLBACK_STEP.to_string()],
    }
}

/// Read `minutes` the lenient way: numbers are truncated, strings give their
/// leading integer.
fn lenient_minutes(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => leading_integer(s),
        _ => None,
    }
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Digit strings too long for i64 saturate, so they still clamp
    Some(digits[..end].parse::<i64>().map_or(sign * i64::MAX, |n| sign * n))
}

/// Extract the JSON object embedded in `text` (first `{` to last `}`)
fn embedded_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse a model reply into an estimate, falling back on anything unusable
pub fn parse_estimate_reply(reply: &str, title: &str) -> Estimate {
    match try_parse(reply) {
        Some(estimate) => estimate,
        None => {
            tracing::warn!(title, "unusable estimate reply, using heuristic");
            fallback_estimate(title)
        }
    }
}

fn try_parse(reply: &str) -> Option<Estimate> {
    let parsed: Value = serde_json::from_str(embedded_object(reply)?).ok()?;

    let minutes = parsed.get("minutes").and_then(lenient_minutes)?;
    if minutes <= 0 {
        return None;
    }
    let minutes = minutes.clamp(MIN_MINUTES as i64, MAX_MINUTES as i64) as u32;

    let first_principles = parsed
        .get("firstPrinciples")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let steps = parsed
        .get("steps")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(Estimate {
        minutes,
        first_principles,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_plain_reply() {
        let reply = r#"{"minutes": 90, "firstPrinciples": "Draft then edit.", "steps": ["Outline", "Draft"]}"#;
        let estimate = parse_estimate_reply(reply, "Write blog post");
        assert_eq!(
            estimate,
            Estimate {
                minutes: 90,
                first_principles: "Draft then edit.".to_string(),
                steps: vec!["Outline".to_string(), "Draft".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_reply_wrapped_in_prose() {
        let reply = "Sure! Here you go:\n```json\n{\"minutes\": 45}\n```\nGood luck {you got this}";
        // first { to last } spans the trailing braces too, which is not valid JSON
        assert_eq!(parse_estimate_reply(reply, "one two").minutes, 20);

        let reply = "Here you go:\n```json\n{\"minutes\": 45}\n```";
        assert_eq!(parse_estimate_reply(reply, "one two").minutes, 45);
    }

    #[test]
    fn test_minutes_are_clamped() {
        assert_eq!(parse_estimate_reply(r#"{"minutes": 1000}"#, "t").minutes, 480);
        assert_eq!(parse_estimate_reply(r#"{"minutes": 1}"#, "t").minutes, 5);
        assert_eq!(
            parse_estimate_reply(r#"{"minutes": "99999999999999999999"}"#, "t").minutes,
            480
        );
    }

    #[test]
    fn test_lenient_minutes() {
        assert_eq!(parse_estimate_reply(r#"{"minutes": 90.9}"#, "t").minutes, 90);
        assert_eq!(parse_estimate_reply(r#"{"minutes": "75 minutes"}"#, "t").minutes, 75);
    }

    #[test]
    fn test_fallback_when_minutes_unusable() {
        let title = "Plan the team offsite";
        let expected = fallback_estimate(title);
        assert_eq!(expected.minutes, 40);

        for reply in [
            r#"{"firstPrinciples": "x"}"#,
            r#"{"minutes": "soon"}"#,
            r#"{"minutes": 0}"#,
            r#"{"minutes": -20}"#,
            "no json at all",
            "{ broken",
        ] {
            assert_eq!(parse_estimate_reply(reply, title), expected, "reply: {reply}");
        }
    }

    #[test]
    fn test_fallback_bounds() {
        assert_eq!(fallback_estimate("Email").minutes, 15);
        assert_eq!(fallback_estimate("a b c d e f g h").minutes, 60);
        assert_eq!(fallback_estimate("Email").steps, vec!["Complete the task".to_string()]);
        assert_eq!(
            fallback_estimate("Email").first_principles,
            "Based on task complexity estimation"
        );
    }

    #[test]
    fn test_estimate_serializes_camel_case() {
        let json = serde_json::to_value(fallback_estimate("Email")).unwrap();
        assert_eq!(json["minutes"], 15);
        assert_eq!(json["firstPrinciples"], "Based on task complexity estimation");
        assert_eq!(json["steps"][0], "Complete the task");
    }

    #[test]
    fn test_into_analysis_drops_empty() {
        let estimate = Estimate {
            minutes: 30,
            first_principles: " ".to_string(),
            steps: vec![],
        };
        assert_eq!(estimate.into_analysis(), (None, None));
    }
}
