//! PDF composition for stroke overlays.
//!
//! This crate owns the lopdf document surgery: building blank host
//! documents for notebook rendering, and appending an overlay's content
//! stream and alpha resources onto an existing page. Overlays tagged as
//! rotated are placed through a 90° rotation matrix so landscape pages
//! keep the device's portrait capture orientation.

mod error;

pub use error::ComposeError;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use scrawl_render::OverlayPage;
use scrawl_types::Size;

/// Create a document of empty pages with the given media boxes.
///
/// Used for notebook rendering, where there is no host PDF to annotate.
pub fn blank_document(pages: &[Size]) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::with_capacity(pages.len());
    for size in pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), size.width.into(), size.height.into()],
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages.len() as i64,
    };
    doc.objects.insert(pages_id, pages_dict.into());

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Append an overlay to an existing page, on top of its current content.
///
/// The overlay's operations are wrapped in `q … Q` so its graphics state
/// never leaks into the host page. When the overlay is rotated, a
/// rotation matrix maps the swapped layout space onto the landscape
/// page. Alpha states become `ExtGState` entries merged into the page's
/// resources (following one level of indirection if the resource
/// dictionaries are stored as references).
pub fn apply_overlay(
    doc: &mut Document,
    page_id: ObjectId,
    overlay: &OverlayPage,
) -> Result<(), ComposeError> {
    let gs_refs: Vec<(String, ObjectId)> = overlay
        .alpha_states
        .iter()
        .map(|state| {
            let id = doc.add_object(dictionary! {
                "Type" => "ExtGState",
                "CA" => state.alpha,
                "ca" => state.alpha,
            });
            (state.name.clone(), id)
        })
        .collect();

    let content = Content { operations: wrap_operations(overlay) };
    let stream = Stream::new(dictionary! {}, content.encode()?);
    let content_id = doc.add_object(Object::Stream(stream));

    // Snapshot the resource dictionaries before taking mutable borrows.
    let page = doc.get_object(page_id)?.as_dict()?;
    let (mut resources, resources_ref) = match page.get(b"Resources") {
        Ok(Object::Reference(id)) => (doc.get_object(*id)?.as_dict()?.clone(), Some(*id)),
        Ok(Object::Dictionary(dict)) => (dict.clone(), None),
        _ => (Dictionary::new(), None),
    };
    let mut ext_g_state = match resources.get(b"ExtGState") {
        Ok(Object::Reference(id)) => doc.get_object(*id)?.as_dict()?.clone(),
        Ok(Object::Dictionary(dict)) => dict.clone(),
        _ => Dictionary::new(),
    };
    for (name, id) in &gs_refs {
        ext_g_state.set(name.as_bytes(), Object::Reference(*id));
    }
    resources.set("ExtGState", Object::Dictionary(ext_g_state));

    match resources_ref {
        Some(id) => {
            *doc.get_object_mut(id)? = Object::Dictionary(resources);
        }
        None => {
            let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
            page.set("Resources", Object::Dictionary(resources));
        }
    }

    // Add the overlay stream after the existing content so it draws on top.
    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    match page.get_mut(b"Contents") {
        Ok(contents) => {
            let mut array = match contents.as_array() {
                Ok(arr) => arr.clone(),
                Err(_) => vec![contents.clone()],
            };
            array.push(Object::Reference(content_id));
            page.set("Contents", Object::Array(array));
        }
        Err(_) => {
            page.set("Contents", Object::Reference(content_id));
        }
    }

    Ok(())
}

fn wrap_operations(overlay: &OverlayPage) -> Vec<Operation> {
    let mut operations = Vec::with_capacity(overlay.operations.len() + 3);
    operations.push(Operation::new("q", vec![]));
    if overlay.rotated {
        // Layout space is (h, w) of a (w, h) landscape page: x' = y,
        // y' = pageheight - x, with pageheight = layout width.
        operations.push(Operation::new(
            "cm",
            vec![
                0.into(),
                (-1.0f32).into(),
                1.into(),
                0.into(),
                0.into(),
                overlay.size.width.into(),
            ],
        ));
    }
    operations.extend(overlay.operations.iter().cloned());
    operations.push(Operation::new("Q", vec![]));
    operations
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrawl_render::AlphaState;

    fn overlay(rotated: bool) -> OverlayPage {
        OverlayPage {
            size: Size::new(612.0, 792.0),
            rotated,
            operations: vec![
                Operation::new("w", vec![2.into()]),
                Operation::new("m", vec![0.into(), 0.into()]),
                Operation::new("l", vec![10.into(), 10.into()]),
                Operation::new("S", vec![]),
            ],
            alpha_states: vec![AlphaState { name: "GS0".into(), alpha: 0.2 }],
        }
    }

    fn first_page(doc: &Document) -> ObjectId {
        *doc.get_pages().get(&1).unwrap()
    }

    #[test]
    fn blank_document_has_the_requested_pages() {
        let doc = blank_document(&[Size::new(612.0, 792.0), Size::new(1404.0, 1872.0)]);
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 2);

        let page = doc.get_object(*pages.get(&2).unwrap()).unwrap().as_dict().unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        assert_eq!(media_box[2].as_f32().unwrap(), 1404.0);
        assert_eq!(media_box[3].as_f32().unwrap(), 1872.0);
    }

    #[test]
    fn apply_overlay_appends_a_content_stream() {
        let mut doc = blank_document(&[Size::new(612.0, 792.0)]);
        let page_id = first_page(&doc);
        apply_overlay(&mut doc, page_id, &overlay(false)).unwrap();

        let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
        let contents = page.get(b"Contents").unwrap().as_array().unwrap();
        assert_eq!(contents.len(), 2);

        let full = doc.get_page_content(page_id).unwrap();
        let decoded = Content::decode(&full).unwrap();
        let operators: Vec<&str> = decoded.operations.iter().map(|op| op.operator.as_str()).collect();
        assert!(operators.contains(&"q"));
        assert!(operators.contains(&"S"));
        assert!(operators.contains(&"Q"));
        assert!(!operators.contains(&"cm"));
    }

    #[test]
    fn rotated_overlays_get_a_rotation_matrix() {
        let mut doc = blank_document(&[Size::new(792.0, 612.0)]);
        let page_id = first_page(&doc);
        let mut ov = overlay(true);
        ov.size = Size::new(612.0, 792.0);
        apply_overlay(&mut doc, page_id, &ov).unwrap();

        let full = doc.get_page_content(page_id).unwrap();
        let decoded = Content::decode(&full).unwrap();
        let cm = decoded
            .operations
            .iter()
            .find(|op| op.operator == "cm")
            .expect("rotation matrix present");
        // Translation component equals the landscape page height.
        assert_eq!(cm.operands[5].as_f32().unwrap(), 612.0);
    }

    #[test]
    fn alpha_states_land_in_the_page_resources() {
        let mut doc = blank_document(&[Size::new(612.0, 792.0)]);
        let page_id = first_page(&doc);
        apply_overlay(&mut doc, page_id, &overlay(false)).unwrap();

        let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
        let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
        let ext_g_state = resources.get(b"ExtGState").unwrap().as_dict().unwrap();
        let gs_ref = ext_g_state.get(b"GS0").unwrap().as_reference().unwrap();
        let gs = doc.get_object(gs_ref).unwrap().as_dict().unwrap();
        assert_eq!(gs.get(b"ca").unwrap().as_f32().unwrap(), 0.2);
    }

    #[test]
    fn overlaying_twice_merges_alpha_states() {
        let mut doc = blank_document(&[Size::new(612.0, 792.0)]);
        let page_id = first_page(&doc);
        apply_overlay(&mut doc, page_id, &overlay(false)).unwrap();

        let mut second = overlay(false);
        second.alpha_states = vec![AlphaState { name: "GS1".into(), alpha: 0.9 }];
        apply_overlay(&mut doc, page_id, &second).unwrap();

        let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
        let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
        let ext_g_state = resources.get(b"ExtGState").unwrap().as_dict().unwrap();
        assert!(ext_g_state.get(b"GS0").is_ok());
        assert!(ext_g_state.get(b"GS1").is_ok());

        let contents = page.get(b"Contents").unwrap().as_array().unwrap();
        assert_eq!(contents.len(), 3);
    }
}
