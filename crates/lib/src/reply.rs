//! Reply content: turn search results into a three-card Flex carousel.
//!
//! The carousel always has three slots mapped to `items[0..3]`. A result set with fewer
//! than three items is an error rather than a shorter carousel; callers see which slot
//! was missing.

use crate::flex::{
    Action, AspectMode, Bubble, Button, ButtonStyle, Carousel, FlexBox, FlexMessage, Image, Text,
};
use crate::rakuten::SearchItem;

/// Number of cards in every reply carousel.
pub const CAROUSEL_SLOTS: usize = 3;

pub const ALT_TEXT: &str = "This is a Flex Message";
pub const PRICE_SUFFIX: &str = "円";
pub const PRODUCT_PAGE_LABEL: &str = "楽天市場商品ページへ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplyError {
    #[error("no search result for carousel slot {index}")]
    MissingItem { index: usize },
    #[error("search result in carousel slot {index} has no image")]
    MissingImage { index: usize },
}

/// Build the flex message for the first three search results.
pub fn make_reply_content(items: &[SearchItem]) -> Result<FlexMessage, ReplyError> {
    let bubbles = (0..CAROUSEL_SLOTS)
        .map(|index| make_part(index, items.get(index)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FlexMessage::new(ALT_TEXT, Carousel::new(bubbles)))
}

/// Build one product card. `index` is the carousel slot, used in errors.
pub fn make_part(index: usize, item: Option<&SearchItem>) -> Result<Bubble, ReplyError> {
    let item = item.ok_or(ReplyError::MissingItem { index })?;
    let image = item
        .medium_image_urls
        .first()
        .ok_or(ReplyError::MissingImage { index })?;
    let price = format!("{}{}", item.item_price, PRICE_SUFFIX);

    Ok(Bubble {
        hero: Some(
            Image::new(image.as_str())
                .size("full")
                .aspect_ratio("20:13")
                .aspect_mode(AspectMode::Cover)
                .into(),
        ),
        body: Some(
            FlexBox::vertical(vec![
                Text::new(item.item_name.as_str()).wrap().bold().size("lg").into(),
                FlexBox::baseline(vec![Text::new(price).wrap().bold().flex(0).into()]).into(),
            ])
            .spacing("sm"),
        ),
        footer: Some(
            FlexBox::vertical(vec![Button::new(Action::uri(PRODUCT_PAGE_LABEL, item.item_url.as_str()))
                .style(ButtonStyle::Primary)
                .into()])
            .spacing("sm"),
        ),
    })
}
