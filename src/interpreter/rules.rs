// VoxFlow — Customization rules: intent phrases to parameter rewrites

use crate::workflow::WorkflowNode;
use regex::Regex;
use serde_json::{json, Value};

/// One customization rule: a set of trigger phrases and the parameter
/// assignments applied when any phrase occurs in the lowercased command.
pub struct Rule {
    triggers: &'static [&'static str],
    sets: Vec<(&'static str, Value)>,
}

impl Rule {
    fn new(triggers: &'static [&'static str], sets: Vec<(&'static str, Value)>) -> Self {
        Self { triggers, sets }
    }

    fn matches(&self, lower_command: &str) -> bool {
        self.triggers.iter().any(|t| lower_command.contains(t))
    }

    fn apply(&self, node: &mut WorkflowNode) {
        for (key, value) in &self.sets {
            node.set_param(key, value.clone());
        }
    }
}

/// The fixed rule chains applied to generation and processing nodes.
///
/// Style and size groups are exclusive (first matching rule wins, the rest
/// are skipped); the quality rule and the processing rules are independent.
pub struct RuleSet {
    style: Vec<Rule>,
    quality: Vec<Rule>,
    size: Vec<Rule>,
    processing: Vec<Rule>,
}

impl RuleSet {
    pub fn standard() -> Self {
        Self {
            style: vec![
                Rule::new(&["realistic", "photorealistic"], vec![("style", json!("photorealistic"))]),
                Rule::new(&["anime", "manga"], vec![("style", json!("anime"))]),
                Rule::new(&["cartoon", "comic"], vec![("style", json!("cartoon"))]),
                Rule::new(&["art", "painting"], vec![("style", json!("artistic"))]),
            ],
            quality: vec![Rule::new(
                &["high quality", "4k", "detailed"],
                vec![("quality", json!("high")), ("steps", json!(50))],
            )],
            size: vec![
                Rule::new(&["portrait"], vec![("width", json!(512)), ("height", json!(768))]),
                Rule::new(&["landscape"], vec![("width", json!(768)), ("height", json!(512))]),
                Rule::new(&["square"], vec![("width", json!(512)), ("height", json!(512))]),
            ],
            processing: vec![
                Rule::new(&["blur", "smooth"], vec![("blur_strength", json!(0.5))]),
                Rule::new(&["sharp", "detailed"], vec![("sharpen", json!(true))]),
            ],
        }
    }

    /// Rewrite a generation node in place. `command` is the original-case
    /// text (prompt extraction preserves the user's casing), `lower_command`
    /// its lowercased form used for phrase detection.
    pub fn customize_generation(
        &self,
        node: &mut WorkflowNode,
        lower_command: &str,
        command: &str,
    ) {
        apply_first(&self.style, node, lower_command);
        apply_all(&self.quality, node, lower_command);
        apply_first(&self.size, node, lower_command);
        node.set_param("prompt", json!(extract_prompt(command)));
    }

    /// Rewrite a processing node in place. Both rules may apply.
    pub fn customize_processing(&self, node: &mut WorkflowNode, lower_command: &str) {
        apply_all(&self.processing, node, lower_command);
    }
}

fn apply_first(rules: &[Rule], node: &mut WorkflowNode, lower_command: &str) {
    if let Some(rule) = rules.iter().find(|r| r.matches(lower_command)) {
        rule.apply(node);
    }
}

fn apply_all(rules: &[Rule], node: &mut WorkflowNode, lower_command: &str) {
    for rule in rules.iter().filter(|r| r.matches(lower_command)) {
        rule.apply(node);
    }
}

// ---------------------------------------------------------------------------
// Prompt extraction
// ---------------------------------------------------------------------------

const DEFAULT_PROMPT: &str = "beautiful artwork";

/// Phrase groups stripped from the command, in order: verbs, object phrases,
/// styles, quality, sizes. Each group is removed in a single pass with no
/// re-scan, so fragments joined by a removal are never stripped again.
const STRIP_PATTERNS: &[&str] = &[
    r"(?i)create|generate|make|draw|paint",
    r"(?i)an image of|a picture of|a photo of",
    r"(?i)realistic|anime|cartoon|artistic",
    r"(?i)high quality|4k|detailed",
    r"(?i)portrait|landscape|square",
];

/// Derive the generation prompt from the command by stripping command
/// phrasing and keeping the remaining subject text.
pub fn extract_prompt(command: &str) -> String {
    let mut text = command.to_string();
    for pattern in STRIP_PATTERNS {
        let re = Regex::new(pattern).unwrap();
        text = re.replace_all(&text, "").into_owned();
    }
    let text = text.trim();
    if text.is_empty() {
        DEFAULT_PROMPT.to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::NodeType;

    fn gen_node() -> WorkflowNode {
        WorkflowNode::new("gen-1", "Model", NodeType::Generation, "generate", json!({}))
    }

    fn proc_node() -> WorkflowNode {
        WorkflowNode::new("proc-1", "Filter", NodeType::Processing, "process", json!({}))
    }

    #[test]
    fn test_style_first_match_wins() {
        let rules = RuleSet::standard();
        let mut node = gen_node();
        let command = "an anime cartoon drawing";
        rules.customize_generation(&mut node, &command.to_lowercase(), command);
        assert_eq!(node.parameters["style"], json!("anime"));
    }

    #[test]
    fn test_realistic_beats_anime() {
        let rules = RuleSet::standard();
        let mut node = gen_node();
        let command = "realistic anime girl";
        rules.customize_generation(&mut node, &command.to_lowercase(), command);
        assert_eq!(node.parameters["style"], json!("photorealistic"));
    }

    #[test]
    fn test_quality_sets_steps() {
        let rules = RuleSet::standard();
        let mut node = gen_node();
        let command = "a detailed castle";
        rules.customize_generation(&mut node, &command.to_lowercase(), command);
        assert_eq!(node.parameters["quality"], json!("high"));
        assert_eq!(node.parameters["steps"], json!(50));
    }

    #[test]
    fn test_size_exclusive() {
        let rules = RuleSet::standard();
        let mut node = gen_node();
        let command = "a portrait in a landscape";
        rules.customize_generation(&mut node, &command.to_lowercase(), command);
        assert_eq!(node.parameters["width"], json!(512));
        assert_eq!(node.parameters["height"], json!(768));
    }

    #[test]
    fn test_processing_rules_are_independent() {
        let rules = RuleSet::standard();
        let mut node = proc_node();
        rules.customize_processing(&mut node, "smooth but detailed");
        assert_eq!(node.parameters["blur_strength"], json!(0.5));
        assert_eq!(node.parameters["sharpen"], json!(true));
    }

    #[test]
    fn test_extract_prompt_strips_phrases() {
        assert_eq!(extract_prompt("generate a portrait of a person"), "a  of a person");
        assert_eq!(extract_prompt("create an image of a red dragon"), "a red dragon");
    }

    #[test]
    fn test_extract_prompt_case_insensitive() {
        assert_eq!(extract_prompt("DRAW a CARTOON cat"), "a  cat");
    }

    #[test]
    fn test_extract_prompt_empty_defaults() {
        assert_eq!(extract_prompt(""), DEFAULT_PROMPT);
        assert_eq!(extract_prompt("create generate draw"), DEFAULT_PROMPT);
        assert_eq!(extract_prompt("   "), DEFAULT_PROMPT);
    }

    #[test]
    fn test_extract_prompt_no_rescan() {
        // Removing the inner "create" joins "cre" + "ate" into "create",
        // but each pattern runs exactly once, so the joined word survives.
        assert_eq!(extract_prompt("crecreateate"), "create");
    }
}
