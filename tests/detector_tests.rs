use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use hpges::{natural_germanium, Hpge, HpgeOptions, Metadata, Registry, Solid, Variant};
use serde_json::json;

fn config_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("test_data")
        .join(format!("{}.json", name))
}

fn build(variant: Variant, name: &str) -> (Hpge, Registry) {
    let mut registry = Registry::new();
    let det = Hpge::new(
        variant,
        config_path(name),
        &mut registry,
        HpgeOptions::default().with_material(natural_germanium()),
    )
    .unwrap();
    (det, registry)
}

#[test]
fn every_variant_builds_directly() {
    let cases = [
        (Variant::InvertedCoax, "V99000A"),
        (Variant::Bege, "B99000A"),
        (Variant::Ppc, "P99000A"),
        (Variant::SemiCoax, "C99000A"),
        (Variant::V07646A, "V07646A"),
        (Variant::P00664B, "P00664B"),
        (Variant::V02162B, "V02162B"),
        (Variant::V02160A, "V02160A"),
    ];
    for (variant, name) in cases {
        let (det, registry) = build(variant, name);
        assert_eq!(det.variant(), variant);
        assert_eq!(det.profile().validate(), Ok(()), "{}", name);
        assert!(det.mass() > 0.0);
        assert!(registry.solid(det.solid()).is_some());
        let lv = registry.logical_volume(det.logical_volume()).unwrap();
        assert_eq!(lv.material, "NaturalGermanium");
    }
}

#[test]
fn minimal_icpc_reference_profile() {
    let metadata = Metadata::from_value(json!({
        "name": "V00001A",
        "type": "icpc",
        "production": { "enrichment": 0.9 },
        "geometry": {
            "height_in_mm": 100.0,
            "radius_in_mm": 40.0,
            "groove": { "depth_in_mm": 2.0, "radius_in_mm": { "outer": 10.0, "inner": 7.0 } },
            "borehole": { "radius_in_mm": 5.0, "depth_in_mm": 60.0 },
            "taper": {
                "top": { "angle_in_deg": 45.0, "height_in_mm": 0.0 },
                "bottom": { "angle_in_deg": 45.0, "height_in_mm": 0.0 },
                "borehole": { "angle_in_deg": 45.0, "height_in_mm": 0.0 }
            }
        }
    }))
    .unwrap();

    let mut registry = Registry::new();
    let det = hpges::make_hpge(metadata, &mut registry, HpgeOptions::default()).unwrap();

    let r = [0.0, 7.0, 7.0, 10.0, 10.0, 40.0, 40.0, 5.0, 5.0, 0.0];
    let z = [0.0, 0.0, 2.0, 2.0, 0.0, 0.0, 100.0, 100.0, 40.0, 40.0];
    assert_eq!(det.profile().len(), 10);
    assert_eq!(det.profile().r(), r);
    assert_eq!(det.profile().z(), z);

    match registry.solid("V00001A").unwrap() {
        Solid::GenericPolycone {
            r: solid_r,
            z: solid_z,
            delta_phi,
            ..
        } => {
            assert_eq!(solid_r, &r);
            assert_eq!(solid_z, &z);
            assert_relative_eq!(*delta_phi, 2.0 * PI);
        }
        other => panic!("unexpected solid {:?}", other),
    }

    // cylinder minus groove ring and borehole
    let expected = PI
        * (40.0_f64.powi(2) * 100.0 - (10.0_f64.powi(2) - 7.0_f64.powi(2)) * 2.0
            - 5.0_f64.powi(2) * 60.0);
    assert_relative_eq!(det.volume(), expected, max_relative = 1e-12);
}

#[test]
fn icpc_profile_from_fixture() {
    let (det, _) = build(Variant::InvertedCoax, "V99000A");
    let r = det.profile().r();
    let z = det.profile().z();
    assert_eq!(r.len(), 12);
    assert_relative_eq!(r[5], 30.0, epsilon = 1e-9);
    assert_eq!((r[6], z[6]), (40.0, 10.0));
    assert_eq!((r[7], z[7]), (40.0, 90.0));
    assert_relative_eq!(r[8], 30.0, epsilon = 1e-9);
    assert_eq!(&z[9..], &[100.0, 40.0, 40.0]);
}

#[test]
fn semicoax_profile_from_fixture() {
    let (det, _) = build(Variant::SemiCoax, "C99000A");
    let coords = det.profile().coords();
    assert_eq!((coords[0].x, coords[0].y), (0.0, 65.0));
    assert_eq!((coords[2].x, coords[2].y), (6.0, 4.0));
    assert_relative_eq!(coords[3].x, 6.0 + 4.0 * 30.0_f64.to_radians().tan());
    assert_eq!(coords.last().map(|c| (c.x, c.y)), Some((0.0, 80.0)));
}

#[test]
fn named_variant_differs_from_generic() {
    let (named, _) = build(Variant::V07646A, "V07646A");
    let (generic, _) = build(Variant::InvertedCoax, "V07646A");
    assert_ne!(named.profile(), generic.profile());
    assert!(named.volume() < generic.volume());
}

#[test]
fn cracked_variant_registers_subtraction() {
    let (det, registry) = build(Variant::P00664B, "P00664B");
    assert!(matches!(
        registry.solid("P00664B"),
        Some(Solid::Subtraction { .. })
    ));
    assert!(matches!(
        registry.solid("P00664B_crack"),
        Some(Solid::Box { .. })
    ));
    let (generic, _) = build(Variant::Ppc, "P00664B");
    assert!(det.volume() < generic.volume());
    assert!(det.volume() > 0.95 * generic.volume());
}

#[test]
fn mass_scales_with_density() {
    let mut registry = Registry::new();
    let natural = Hpge::new(
        Variant::Bege,
        config_path("B99000A"),
        &mut registry,
        HpgeOptions::default().with_material(natural_germanium()),
    )
    .unwrap();
    let enriched = Hpge::new(
        Variant::Bege,
        config_path("B99000A"),
        &mut registry,
        HpgeOptions::default().with_name("B99000A_enr"),
    )
    .unwrap();
    assert_relative_eq!(natural.volume(), enriched.volume());
    assert_relative_eq!(
        enriched.mass() / natural.mass(),
        enriched.material().density_g_cm3 / natural.material().density_g_cm3,
        max_relative = 1e-12
    );
}

#[test]
fn registry_serializes() {
    let (_, registry) = build(Variant::V02160A, "V02160A");
    let value = serde_json::to_value(&registry).unwrap();
    assert_eq!(value["solids"].as_array().unwrap().len(), 3);
    assert_eq!(value["solids"][2]["kind"], "Subtraction");
    assert_eq!(value["logical_volumes"][0]["solid"], "V02160A");
}
