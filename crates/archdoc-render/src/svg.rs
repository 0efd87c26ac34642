//! SVG serialization of a rendered document.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::document::RenderedDocument;
use crate::error::{RenderError, Result};
use crate::theme::{FONT_FAMILY, palette};
use crate::unit::Primitive;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Serialize the document as a standalone SVG string.
pub fn to_svg(document: &RenderedDocument) -> Result<String> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(RenderError::svg)?;

    let width = number(document.width());
    let height = number(document.height());
    let view_box = format!("0 0 {width} {height}");
    let mut root = BytesStart::new("svg");
    root.push_attribute(("xmlns", SVG_NS));
    root.push_attribute(("width", width.as_str()));
    root.push_attribute(("height", height.as_str()));
    root.push_attribute(("viewBox", view_box.as_str()));
    root.push_attribute(("font-family", FONT_FAMILY));
    xml.write_event(Event::Start(root)).map_err(RenderError::svg)?;

    let mut background = BytesStart::new("rect");
    background.push_attribute(("width", "100%"));
    background.push_attribute(("height", "100%"));
    background.push_attribute(("fill", palette::PAGE));
    xml.write_event(Event::Empty(background))
        .map_err(RenderError::svg)?;

    for placed in document.units() {
        let mut group = BytesStart::new("g");
        let transform = format!("translate(0 {})", number(placed.offset_y));
        group.push_attribute(("transform", transform.as_str()));
        xml.write_event(Event::Start(group)).map_err(RenderError::svg)?;
        for primitive in &placed.unit.primitives {
            write_primitive(&mut xml, primitive)?;
        }
        xml.write_event(Event::End(BytesEnd::new("g")))
            .map_err(RenderError::svg)?;
    }

    xml.write_event(Event::End(BytesEnd::new("svg")))
        .map_err(RenderError::svg)?;
    String::from_utf8(xml.into_inner()).map_err(RenderError::svg)
}

fn write_primitive<W: Write>(xml: &mut Writer<W>, primitive: &Primitive) -> Result<()> {
    match primitive {
        Primitive::Rect {
            x,
            y,
            width,
            height,
            radius,
            fill,
        } => {
            let (x, y, width, height) = (number(*x), number(*y), number(*width), number(*height));
            let mut rect = BytesStart::new("rect");
            rect.push_attribute(("x", x.as_str()));
            rect.push_attribute(("y", y.as_str()));
            rect.push_attribute(("width", width.as_str()));
            rect.push_attribute(("height", height.as_str()));
            if *radius > 0.0 {
                let radius = number(*radius);
                rect.push_attribute(("rx", radius.as_str()));
            }
            rect.push_attribute(("fill", *fill));
            xml.write_event(Event::Empty(rect)).map_err(RenderError::svg)
        }
        Primitive::Text {
            x,
            y,
            size,
            weight,
            anchor,
            fill,
            content,
        } => {
            let (x, y, size) = (number(*x), number(*y), number(*size));
            let mut text = BytesStart::new("text");
            text.push_attribute(("x", x.as_str()));
            text.push_attribute(("y", y.as_str()));
            text.push_attribute(("font-size", size.as_str()));
            text.push_attribute(("font-weight", weight.as_svg()));
            text.push_attribute(("text-anchor", anchor.as_svg()));
            text.push_attribute(("fill", *fill));
            text.push_attribute(("xml:space", "preserve"));
            xml.write_event(Event::Start(text))
                .map_err(RenderError::svg)?;
            xml.write_event(Event::Text(BytesText::new(content)))
                .map_err(RenderError::svg)?;
            xml.write_event(Event::End(BytesEnd::new("text")))
                .map_err(RenderError::svg)
        }
    }
}

/// Compact, locale-independent number formatting (at most two decimals).
fn number(value: f32) -> String {
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(40.0), "40");
        assert_eq!(number(12.5), "12.5");
        assert_eq!(number(1.0 / 3.0), "0.33");
        assert_eq!(number(-0.001), "0");
    }
}
