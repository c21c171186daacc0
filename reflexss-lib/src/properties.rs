//! Factories for common CSS properties.
//!
//! Each factory only names the property; values are never validated. Any
//! property missing here can be built with [`Command::new`] or
//! `Library::command`.

use crate::command::Command;
use crate::value::CssValue;

macro_rules! properties {
    ($($(#[$meta:meta])* $fn_name:ident => $name:literal),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $fn_name(values: impl IntoIterator<Item = CssValue>) -> Command {
                Command::new($name, values)
            }
        )*
    };
}

properties! {
    /// Horizontal position of a positioned element.
    left => "left",
    right => "right",
    top => "top",
    bottom => "bottom",
    /// Logical block-end offset; maps to a physical inset depending on
    /// writing mode, direction and text orientation.
    inset_block_end => "insetBlockEnd",
    inset_block_start => "insetBlockStart",
    position => "position",
    display => "display",
    width => "width",
    height => "height",
    min_width => "minWidth",
    max_width => "maxWidth",
    margin => "margin",
    padding => "padding",
    border => "border",
    border_radius => "borderRadius",
    color => "color",
    background_color => "backgroundColor",
    font_family => "fontFamily",
    font_size => "fontSize",
    font_weight => "fontWeight",
    line_height => "lineHeight",
    text_align => "textAlign",
    opacity => "opacity",
    z_index => "zIndex",
    flex_direction => "flexDirection",
    justify_content => "justifyContent",
    align_items => "alignItems",
    gap => "gap",
    grid_template_columns => "gridTemplateColumns",
    transform => "transform",
    transition => "transition",
    cursor => "cursor",
    overflow => "overflow",
    box_shadow => "boxShadow",
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::px;

    #[test]
    fn test_factories_use_camel_case_names() {
        let cmd = inset_block_end([px(4.0).into()]);
        assert_eq!(cmd.name(), "insetBlockEnd");
        assert_eq!(cmd.to_declaration(), "inset-block-end: 4px;");
    }

    #[test]
    fn test_factory_accepts_several_values() {
        let cmd = margin([0.into(), "auto".into()]);
        assert_eq!(cmd.to_declaration(), "margin: 0 auto;");
    }
}
