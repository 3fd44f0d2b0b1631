//! Flex Message builder.
//!
//! Typed nodes for the subset of LINE's Flex schema the bot sends: a carousel of bubbles
//! made of boxes, text, images and buttons. Every node struct writes its own `"type"` key,
//! so a box is tagged whether it sits directly on a bubble or inside another box. Field
//! order in the structs is the key order in the serialized JSON.

use serde::Serialize;

/// Top-level `flex` message (what goes into a reply's `messages` array).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "flex", rename_all = "camelCase")]
pub struct FlexMessage {
    pub alt_text: String,
    pub contents: Carousel,
}

impl FlexMessage {
    pub fn new(alt_text: impl Into<String>, contents: Carousel) -> Self {
        Self {
            alt_text: alt_text.into(),
            contents,
        }
    }
}

/// Horizontally scrollable set of bubbles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "carousel")]
pub struct Carousel {
    pub contents: Vec<Bubble>,
}

impl Carousel {
    pub fn new(contents: Vec<Bubble>) -> Self {
        Self { contents }
    }
}

/// One card: optional hero, body and footer blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "bubble")]
pub struct Bubble {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero: Option<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<FlexBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<FlexBox>,
}

/// Any node that can sit inside a box (or as a bubble hero). Untagged: the wrapped
/// struct carries the `"type"` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Component {
    Box(FlexBox),
    Text(Text),
    Image(Image),
    Button(Button),
}

impl From<FlexBox> for Component {
    fn from(b: FlexBox) -> Self {
        Component::Box(b)
    }
}

impl From<Text> for Component {
    fn from(t: Text) -> Self {
        Component::Text(t)
    }
}

impl From<Image> for Component {
    fn from(i: Image) -> Self {
        Component::Image(i)
    }
}

impl From<Button> for Component {
    fn from(b: Button) -> Self {
        Component::Button(b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Vertical,
    Horizontal,
    Baseline,
}

/// Container laying out child components.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "box")]
pub struct FlexBox {
    pub layout: Layout,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,
    pub contents: Vec<Component>,
}

impl FlexBox {
    pub fn new(layout: Layout, contents: Vec<Component>) -> Self {
        Self {
            layout,
            spacing: None,
            contents,
        }
    }

    pub fn vertical(contents: Vec<Component>) -> Self {
        Self::new(Layout::Vertical, contents)
    }

    pub fn baseline(contents: Vec<Component>) -> Self {
        Self::new(Layout::Baseline, contents)
    }

    pub fn spacing(mut self, spacing: impl Into<String>) -> Self {
        self.spacing = Some(spacing.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Weight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "text")]
pub struct Text {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<u32>,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            wrap: None,
            weight: None,
            size: None,
            flex: None,
        }
    }

    pub fn wrap(mut self) -> Self {
        self.wrap = Some(true);
        self
    }

    pub fn bold(mut self) -> Self {
        self.weight = Some(Weight::Bold);
        self
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn flex(mut self, flex: u32) -> Self {
        self.flex = Some(flex);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectMode {
    Cover,
    Fit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "image", rename_all = "camelCase")]
pub struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_mode: Option<AspectMode>,
    pub url: String,
}

impl Image {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            size: None,
            aspect_ratio: None,
            aspect_mode: None,
            url: url.into(),
        }
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn aspect_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.aspect_ratio = Some(ratio.into());
        self
    }

    pub fn aspect_mode(mut self, mode: AspectMode) -> Self {
        self.aspect_mode = Some(mode);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Link,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "button")]
pub struct Button {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ButtonStyle>,
    pub action: Action,
}

impl Button {
    pub fn new(action: Action) -> Self {
        Self { style: None, action }
    }

    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.style = Some(style);
        self
    }
}

/// What happens when a button is tapped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// Open `uri` (in the external browser for http(s) links).
    Uri { label: String, uri: String },
}

impl Action {
    pub fn uri(label: impl Into<String>, uri: impl Into<String>) -> Self {
        Action::Uri {
            label: label.into(),
            uri: uri.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_omits_unset_fields() {
        let v = serde_json::to_value(Component::from(Text::new("hi"))).unwrap();
        assert_eq!(v, json!({ "type": "text", "text": "hi" }));
    }

    #[test]
    fn bubble_serializes_to_flex_schema() {
        let bubble = Bubble {
            hero: Some(
                Image::new("https://img")
                    .size("full")
                    .aspect_ratio("20:13")
                    .aspect_mode(AspectMode::Cover)
                    .into(),
            ),
            body: Some(
                FlexBox::vertical(vec![
                    Text::new("title").wrap().bold().size("lg").into(),
                    FlexBox::baseline(vec![Text::new("1円").wrap().bold().flex(0).into()]).into(),
                ])
                .spacing("sm"),
            ),
            footer: Some(FlexBox::vertical(vec![Button::new(Action::uri("go", "https://x"))
                .style(ButtonStyle::Primary)
                .into()])),
        };
        let v = serde_json::to_value(&bubble).unwrap();
        assert_eq!(
            v,
            json!({
                "type": "bubble",
                "hero": { "type": "image", "size": "full", "aspectRatio": "20:13", "aspectMode": "cover", "url": "https://img" },
                "body": {
                    "type": "box",
                    "layout": "vertical",
                    "spacing": "sm",
                    "contents": [
                        { "type": "text", "text": "title", "wrap": true, "weight": "bold", "size": "lg" },
                        { "type": "box", "layout": "baseline", "contents": [
                            { "type": "text", "text": "1円", "wrap": true, "weight": "bold", "flex": 0 }
                        ]}
                    ]
                },
                "footer": {
                    "type": "box",
                    "layout": "vertical",
                    "contents": [
                        { "type": "button", "style": "primary", "action": { "type": "uri", "label": "go", "uri": "https://x" } }
                    ]
                }
            })
        );
    }

    #[test]
    fn boxes_are_tagged_once_at_every_level() {
        let bubble = Bubble {
            body: Some(FlexBox::vertical(vec![FlexBox::baseline(vec![Text::new("x").into()]).into()])),
            footer: Some(FlexBox::vertical(Vec::new())),
            ..Default::default()
        };
        let s = serde_json::to_string(&bubble).unwrap();
        assert_eq!(
            s,
            concat!(
                r#"{"type":"bubble","#,
                r#""body":{"type":"box","layout":"vertical","contents":["#,
                r#"{"type":"box","layout":"baseline","contents":[{"type":"text","text":"x"}]}]},"#,
                r#""footer":{"type":"box","layout":"vertical","contents":[]}}"#
            )
        );
    }

    #[test]
    fn message_key_order_is_stable() {
        let msg = FlexMessage::new("alt", Carousel::new(vec![Bubble::default()]));
        let s = serde_json::to_string(&msg).unwrap();
        assert_eq!(
            s,
            r#"{"type":"flex","altText":"alt","contents":{"type":"carousel","contents":[{"type":"bubble"}]}}"#
        );
    }
}
