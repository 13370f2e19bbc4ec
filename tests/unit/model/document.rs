use super::*;
use crate::model::resource::{ResourceRecord, SoundResource};

fn timeline(id: Option<u32>) -> Timeline {
    Timeline {
        resource_id: id.map(ResourceId),
        name: None,
        frames: vec![],
    }
}

#[test]
fn new_model_is_empty() {
    assert!(DocumentModel::new().is_empty());
}

#[test]
fn timelines_are_keyed_in_finalization_order() {
    let mut m = DocumentModel::new();
    let sym = m.push_timeline(timeline(Some(4)));
    let main = m.push_timeline(timeline(None));

    assert_eq!(sym, TimelineKey(0));
    assert_eq!(main, TimelineKey(1));
    assert!(m.main_timeline().unwrap().is_main());
    assert!(m.symbol_timeline(ResourceId(4)).is_some());
    assert!(m.symbol_timeline(ResourceId(5)).is_none());
    assert_eq!(m.timeline(main), m.main_timeline());
}

#[test]
fn attached_resources_are_visible() {
    let mut set = ResourceSet::default();
    set.push(ResourceRecord::Sound(SoundResource {
        id: ResourceId(3),
        name: None,
        path: Some("./sounds/Sound0.MP3".to_string()),
    }));
    let mut m = DocumentModel::new();
    m.attach_resources(set);
    assert!(!m.is_empty());
    assert_eq!(m.resources().sounds.len(), 1);
}
