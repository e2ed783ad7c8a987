// VoxFlow — Built-in workflow template catalog

use crate::workflow::{NodeType, WorkflowNode, WorkflowTemplate};
use serde_json::{json, Value};

/// Id of the designated fallback template. The interpreter resolves this id
/// when no template scores above zero, so the built-in catalog must always
/// contain it.
pub const FALLBACK_TEMPLATE_ID: &str = "general-image-generation";

/// A fixed, ordered, read-only set of workflow templates.
///
/// Templates are defined once at startup; nothing mutates them afterwards,
/// which is what makes concurrent interpreter calls safe without locking.
#[derive(Debug, Clone)]
pub struct Catalog {
    templates: Vec<WorkflowTemplate>,
}

impl Catalog {
    pub fn new(templates: Vec<WorkflowTemplate>) -> Self {
        Self { templates }
    }

    /// The built-in catalog of image-generation workflows.
    pub fn builtin() -> Self {
        Self::new(builtin_templates())
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkflowTemplate> {
        self.templates.iter()
    }

    pub fn get(&self, id: &str) -> Option<&WorkflowTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// The fallback template: `general-image-generation`, or the first
    /// catalog entry if that id is missing (should not occur in a
    /// well-formed catalog).
    pub fn fallback(&self) -> Option<&WorkflowTemplate> {
        self.get(FALLBACK_TEMPLATE_ID).or_else(|| self.templates.first())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Built-in templates
// ---------------------------------------------------------------------------

fn node(
    id: &str,
    name: &str,
    node_type: NodeType,
    description: &str,
    parameters: Value,
) -> WorkflowNode {
    WorkflowNode::new(id, name, node_type, description, parameters)
}

fn template(
    id: &str,
    name: &str,
    description: &str,
    keywords: &[&str],
    nodes: Vec<WorkflowNode>,
) -> WorkflowTemplate {
    WorkflowTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        nodes,
    }
}

fn builtin_templates() -> Vec<WorkflowTemplate> {
    vec![
        template(
            FALLBACK_TEMPLATE_ID,
            "General Image Generation",
            "Basic text-to-image generation workflow",
            &["create", "generate", "image", "picture", "draw", "make"],
            vec![
                node(
                    "input-1",
                    "Text Prompt Input",
                    NodeType::Input,
                    "Input text prompt for image generation",
                    json!({
                        "prompt": "beautiful artwork",
                        "negative_prompt": "blurry, low quality"
                    }),
                ),
                node(
                    "gen-1",
                    "Stable Diffusion Model",
                    NodeType::Generation,
                    "AI model for generating images from text",
                    json!({
                        "model": "stable-diffusion-v1-5",
                        "steps": 30,
                        "cfg_scale": 7.5,
                        "width": 512,
                        "height": 512,
                        "seed": -1
                    }),
                ),
                node(
                    "output-1",
                    "Image Output",
                    NodeType::Output,
                    "Save generated image",
                    json!({ "format": "png", "quality": 100 }),
                ),
            ],
        ),
        template(
            "portrait-generation",
            "Portrait Generation",
            "Specialized workflow for generating portraits",
            &["portrait", "face", "person", "character", "headshot"],
            vec![
                node(
                    "input-2",
                    "Portrait Prompt",
                    NodeType::Input,
                    "Text prompt optimized for portrait generation",
                    json!({
                        "prompt": "professional portrait",
                        "negative_prompt": "blurry, low quality, distorted face"
                    }),
                ),
                node(
                    "proc-2",
                    "Face Enhancement",
                    NodeType::Processing,
                    "Enhance facial features and details",
                    json!({ "face_restoration": true, "skin_smoothing": 0.3 }),
                ),
                node(
                    "gen-2",
                    "Portrait Model",
                    NodeType::Generation,
                    "Specialized model for portrait generation",
                    json!({
                        "model": "realistic-vision",
                        "steps": 40,
                        "cfg_scale": 8.0,
                        "width": 512,
                        "height": 768,
                        "seed": -1
                    }),
                ),
                node(
                    "output-2",
                    "Portrait Output",
                    NodeType::Output,
                    "Save enhanced portrait",
                    json!({ "format": "png", "quality": 95 }),
                ),
            ],
        ),
        template(
            "anime-generation",
            "Anime Style Generation",
            "Generate anime and manga style artwork",
            &["anime", "manga", "japanese", "cartoon", "waifu"],
            vec![
                node(
                    "input-3",
                    "Anime Prompt",
                    NodeType::Input,
                    "Text prompt for anime-style generation",
                    json!({
                        "prompt": "anime character, detailed",
                        "negative_prompt": "realistic, photo, blurry"
                    }),
                ),
                node(
                    "proc-3",
                    "Style Transfer",
                    NodeType::Processing,
                    "Apply anime styling effects",
                    json!({ "style_strength": 0.8, "color_saturation": 1.2 }),
                ),
                node(
                    "gen-3",
                    "Anime Model",
                    NodeType::Generation,
                    "AI model trained on anime artwork",
                    json!({
                        "model": "anything-v4",
                        "steps": 35,
                        "cfg_scale": 9.0,
                        "width": 512,
                        "height": 768,
                        "seed": -1
                    }),
                ),
                node(
                    "output-3",
                    "Anime Output",
                    NodeType::Output,
                    "Save anime-style artwork",
                    json!({ "format": "png", "quality": 100 }),
                ),
            ],
        ),
        template(
            "landscape-generation",
            "Landscape Generation",
            "Generate beautiful landscape and scenery images",
            &["landscape", "scenery", "nature", "mountain", "forest", "ocean", "sky"],
            vec![
                node(
                    "input-4",
                    "Landscape Prompt",
                    NodeType::Input,
                    "Text prompt for landscape generation",
                    json!({
                        "prompt": "beautiful landscape, scenic view",
                        "negative_prompt": "people, buildings, urban"
                    }),
                ),
                node(
                    "proc-4",
                    "Depth Processing",
                    NodeType::Processing,
                    "Enhance depth and perspective",
                    json!({ "depth_enhancement": true, "atmospheric_perspective": 0.7 }),
                ),
                node(
                    "gen-4",
                    "Landscape Model",
                    NodeType::Generation,
                    "Model specialized for landscape generation",
                    json!({
                        "model": "landscape-diffusion",
                        "steps": 45,
                        "cfg_scale": 7.0,
                        "width": 768,
                        "height": 512,
                        "seed": -1
                    }),
                ),
                node(
                    "proc-5",
                    "Color Grading",
                    NodeType::Processing,
                    "Apply cinematic color grading",
                    json!({ "contrast": 1.1, "saturation": 1.05, "temperature": 0.95 }),
                ),
                node(
                    "output-4",
                    "Landscape Output",
                    NodeType::Output,
                    "Save processed landscape image",
                    json!({ "format": "jpg", "quality": 95 }),
                ),
            ],
        ),
        template(
            "upscale-enhance",
            "Image Upscaling & Enhancement",
            "Upscale and enhance existing images",
            &["upscale", "enhance", "improve", "quality", "resolution", "sharpen"],
            vec![
                node(
                    "input-5",
                    "Image Input",
                    NodeType::Input,
                    "Load image for enhancement",
                    json!({ "source": "upload", "format": "auto" }),
                ),
                node(
                    "proc-6",
                    "Noise Reduction",
                    NodeType::Processing,
                    "Remove noise and artifacts",
                    json!({ "noise_reduction": 0.6, "artifact_removal": true }),
                ),
                node(
                    "gen-5",
                    "AI Upscaler",
                    NodeType::Generation,
                    "AI-powered image upscaling",
                    json!({ "model": "real-esrgan", "scale_factor": 4, "face_enhance": true }),
                ),
                node(
                    "proc-7",
                    "Post-Processing",
                    NodeType::Processing,
                    "Final image refinement",
                    json!({ "sharpening": 0.4, "clarity": 0.2 }),
                ),
                node(
                    "output-5",
                    "Enhanced Output",
                    NodeType::Output,
                    "Save upscaled image",
                    json!({ "format": "png", "quality": 100 }),
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_fallback() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 5);
        let fallback = catalog.fallback().unwrap();
        assert_eq!(fallback.id, FALLBACK_TEMPLATE_ID);
    }

    #[test]
    fn test_fallback_defaults_to_first_entry() {
        let catalog = Catalog::builtin();
        let others: Vec<_> = catalog
            .iter()
            .filter(|t| t.id != FALLBACK_TEMPLATE_ID)
            .cloned()
            .collect();
        let catalog = Catalog::new(others);
        assert_eq!(catalog.fallback().unwrap().id, "portrait-generation");
    }

    #[test]
    fn test_template_ids_are_unique() {
        let catalog = Catalog::builtin();
        let mut ids: Vec<&str> = catalog.iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_node_ids_unique_within_template() {
        for tpl in Catalog::builtin().iter() {
            let mut ids: Vec<&str> = tpl.nodes.iter().map(|n| n.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), tpl.nodes.len(), "duplicate node id in {}", tpl.id);
        }
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for tpl in Catalog::builtin().iter() {
            for kw in &tpl.keywords {
                assert_eq!(kw, &kw.to_lowercase(), "keyword not lowercase in {}", tpl.id);
            }
        }
    }
}
