//! The bundled demo adventure stays loadable and packable.

use std::path::PathBuf;

use adventure_content::{ByteOrder, DataFiles, ManifestLoader, WorldLoader, pack_world, write_pack};
use adventure_core::CharacterSource;

fn demo_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../demos/leafy_glade")
}

#[test]
fn demo_world_validates() {
    let world = WorldLoader::load(&demo_dir().join("world.ron")).expect("demo parses");
    world.validate().expect("demo is consistent");
    assert_eq!(world.locations.len(), 4);
    assert_eq!(world.story_text(0), Some("The Leafy Glade"));
}

#[test]
fn demo_manifest_builds_a_party() {
    let manifest = ManifestLoader::load_from_dir(&demo_dir()).expect("demo manifest");
    assert_eq!(manifest.byte_order, ByteOrder::Big);
    let party = manifest.party().expect("party fits");
    assert_eq!(party.len(), 2);
    assert_eq!(manifest.game_config().starting_gold, 20);
}

#[test]
fn demo_packs_and_reads_back() {
    let world = WorldLoader::load(&demo_dir().join("world.ron")).expect("demo parses");
    let manifest = ManifestLoader::load_from_dir(&demo_dir()).expect("demo manifest");
    let out = tempfile::tempdir().expect("tempdir");
    let files = pack_world(&world, &manifest.files, manifest.byte_order).expect("packs");
    write_pack(out.path(), &files).expect("writes");

    let data = DataFiles::open(out.path(), &manifest);
    for level in &world.locations {
        assert_eq!(&data.load_location(level.id).expect("location"), level);
    }
    let alpha = data
        .load_character(CharacterSource::Monster, 2)
        .expect("alpha wolf");
    assert_eq!(alpha.name, "Alpha Wolf");
    assert_eq!(data.load_item(2).expect("pelt").name, "Wolf Pelt");
}
