//! End-to-end compilation of the first-quadrant catalog on synthetic rows

mod common;

use approx::assert_relative_eq;
use cloud_extractor::{
    compile_catalog, compile_firstquad_catalog, get_low_velocity_perseus_clouds,
    get_negative_velocity_clouds, get_positive_velocity_clouds, ExtractionError,
    ExtractorConfig, DEFAULT_MAX_DESCENDANTS, PERSEUS_MAX_DESCENDANTS,
};
use dendro::units::{Angle, AngleExt};
use dendro::Catalog;
use common::{base_catalog, context_with_parents, exact_mass_inputs, mass_at, StructureParams};

/// Five independent structures, each aimed at one branch of the region rules
fn five_structures() -> Vec<StructureParams> {
    vec![
        // Inner Galaxy cloud whose size matches the relation at the far distance
        StructureParams::new(0, 50.0, 3.0, 30.0, 0.2)
            .distances(3.0, 11.0)
            .tree(5, 0.5),
        // Outer Galaxy cloud; tree statistics would fail the other regions
        StructureParams::new(1, -20.0, 2.0, 40.0, 0.3)
            .distances(14.0, 14.0)
            .flux(0.1)
            .tree(100, 0.95),
        // Perseus Arm cloud at the far distance
        StructureParams::new(2, 10.0, 2.0, 40.0, 0.5)
            .distances(0.7, 9.0)
            .tree(2, 0.3),
        // Extreme negative velocity near the Galactic centre
        StructureParams::new(3, -11.0, 2.0, 15.0, 0.0)
            .distances(12.0, 12.0)
            .flux(10.0),
        // Would be an inner Galaxy cloud but touches the cube edge
        StructureParams::new(4, 60.0, 3.0, 30.0, 0.0)
            .distances(4.0, 10.0)
            .on_edge(),
    ]
}

#[test]
fn test_five_row_catalog() {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = context_with_parents(&[None; 5]);
    let base = base_catalog(&five_structures(), &ctx.metadata);

    let clouds = compile_firstquad_catalog(&ctx, &base).unwrap();

    // Stacked in negative, positive, Perseus order
    assert_eq!(clouds.indices(), vec![1, 0, 2]);

    let inner = clouds.get_by_idx(0).unwrap();
    assert_eq!(inner.distance, 11.0);
    assert!(inner.mass > 3e4);

    let outer = clouds.get_by_idx(1).unwrap();
    assert_eq!(outer.distance, 14.0);
    assert!(outer.mass > 3e3);
    assert!(outer.mass < 3e4);

    let perseus = clouds.get_by_idx(2).unwrap();
    assert_eq!(perseus.distance, 9.0);
    assert!(perseus.mass > 3e4);
    assert!(perseus.distance > 5.0 && perseus.distance < 14.0);

    for cloud in clouds.iter() {
        assert!(cloud.mass.is_finite());
        assert!(cloud.physical_radius.is_finite());
    }
}

#[test]
fn test_mass_follows_resolved_distance() {
    let ctx = context_with_parents(&[None; 5]);
    let base = base_catalog(&five_structures(), &ctx.metadata);
    let clouds = compile_firstquad_catalog(&ctx, &base).unwrap();

    // 1 K km/s deg² at 11 kpc with the default conversion factor
    let deg2_to_sr = (std::f64::consts::PI / 180.0).powi(2);
    let expected = ctx.metadata.alpha_co * deg2_to_sr * 11_000.0_f64.powi(2);
    assert_relative_eq!(
        clouds.get_by_idx(0).unwrap().mass,
        expected,
        max_relative = 1e-9
    );
}

#[test]
fn test_cross_region_reduction_keeps_parent() {
    // 0 is a positive-velocity cloud; its child 1 qualifies only for Perseus
    let ctx = context_with_parents(&[None, Some(0)]);
    let params = vec![
        StructureParams::new(0, 22.0, 3.0, 30.0, 0.2)
            .distances(3.0, 11.0)
            .flux(2.0)
            .tree(1, 0.5),
        StructureParams::new(1, 15.0, 2.0, 36.0, 0.1)
            .distances(0.7, 9.0)
            .tree(0, 0.0),
    ];
    let base = base_catalog(&params, &ctx.metadata);

    let (clouds, report) =
        compile_catalog(&ctx, &base, &ExtractorConfig::default().pipelines).unwrap();

    let counts: Vec<usize> = report.per_region.iter().map(|(_, n)| *n).collect();
    assert_eq!(counts, vec![0, 1, 1]);
    assert_eq!(report.stacked, 2);
    assert_eq!(report.composite, 1);
    assert_eq!(clouds.indices(), vec![0]);
}

#[test]
fn test_structure_in_two_regions_appears_once() {
    // v = 20 km/s at l = 40 satisfies both the positive-velocity and Perseus rules
    let ctx = context_with_parents(&[None]);
    let params = vec![StructureParams::new(0, 20.0, 2.0, 40.0, 0.0)
        .distances(0.7, 9.0)
        .tree(0, 0.0)];
    let base = base_catalog(&params, &ctx.metadata);

    let (clouds, report) =
        compile_catalog(&ctx, &base, &ExtractorConfig::default().pipelines).unwrap();
    assert_eq!(report.stacked, 2);
    assert_eq!(clouds.indices(), vec![0]);
}

#[test]
fn test_empty_base_catalog() {
    let ctx = context_with_parents(&[]);
    let clouds = compile_firstquad_catalog(&ctx, &Catalog::empty()).unwrap();
    assert!(clouds.is_empty());
}

#[test]
fn test_invalid_radius_aborts_run() {
    let ctx = context_with_parents(&[None]);
    let params = StructureParams::new(0, 50.0, 3.0, 30.0, 0.2)
        .distances(3.0, 11.0)
        .tree(0, 0.0);
    let mut base = base_catalog(&[params], &ctx.metadata);
    assert!(compile_firstquad_catalog(&ctx, &base).is_ok());

    // Selection never looks at the radius, so the row reaches disambiguation
    base.rows_mut()[0].radius = Angle::from_degrees(f64::NAN);
    let err = compile_firstquad_catalog(&ctx, &base).unwrap_err();
    assert!(matches!(
        err,
        ExtractionError::InvalidStructure { idx: 0, field: "radius", .. }
    ));
}

#[test]
fn test_each_region_on_its_own() {
    let ctx = context_with_parents(&[None; 5]);
    let base = base_catalog(&five_structures(), &ctx.metadata);

    let positive = get_positive_velocity_clouds(&ctx, &base, DEFAULT_MAX_DESCENDANTS).unwrap();
    assert_eq!(positive.indices(), vec![0]);

    let negative = get_negative_velocity_clouds(&ctx, &base, DEFAULT_MAX_DESCENDANTS).unwrap();
    assert_eq!(negative.indices(), vec![1]);
    // The descendant limit has no effect on the negative-velocity region
    let negative = get_negative_velocity_clouds(&ctx, &base, 1).unwrap();
    assert_eq!(negative.indices(), vec![1]);

    let perseus = get_low_velocity_perseus_clouds(&ctx, &base, PERSEUS_MAX_DESCENDANTS).unwrap();
    assert_eq!(perseus.indices(), vec![2]);
    // Structure 2 has two descendants
    let perseus = get_low_velocity_perseus_clouds(&ctx, &base, 2).unwrap();
    assert!(perseus.is_empty());

    // Inputs are left untouched
    assert!(base.get_by_idx(0).unwrap().distance.is_nan());
}

#[test]
fn test_mass_exactly_at_cut_is_excluded() {
    let ctx = context_with_parents(&[None; 6]);
    let (flux, far) = exact_mass_inputs(3e4, 5.0, 14.0, &ctx.metadata);
    assert_eq!(mass_at(flux, far, &ctx.metadata), 3e4);
    let above = flux * 1.001;

    let params = vec![
        StructureParams::new(0, 50.0, 3.0, 30.0, 0.2)
            .distances(3.0, far)
            .flux(flux),
        StructureParams::new(1, 10.0, 2.0, 40.0, 0.5)
            .distances(0.7, far)
            .flux(flux),
        StructureParams::new(2, -20.0, 2.0, 40.0, 0.3).distances(14.0, 14.0),
        StructureParams::new(3, 50.0, 3.0, 30.0, 0.2)
            .distances(3.0, far)
            .flux(above),
        StructureParams::new(4, 10.0, 2.0, 40.0, 0.5)
            .distances(0.7, far)
            .flux(above),
        StructureParams::new(5, -20.0, 2.0, 40.0, 0.3).distances(14.0, 14.0),
    ];
    let mut base = base_catalog(&params, &ctx.metadata);
    // Negative-velocity clouds keep their base-catalog mass
    base.rows_mut()[2].mass = 3e3;
    base.rows_mut()[5].mass = 3e3 * 1.001;

    let positive = get_positive_velocity_clouds(&ctx, &base, DEFAULT_MAX_DESCENDANTS).unwrap();
    assert_eq!(positive.indices(), vec![3]);

    let perseus = get_low_velocity_perseus_clouds(&ctx, &base, PERSEUS_MAX_DESCENDANTS).unwrap();
    assert_eq!(perseus.indices(), vec![4]);

    let negative = get_negative_velocity_clouds(&ctx, &base, DEFAULT_MAX_DESCENDANTS).unwrap();
    assert_eq!(negative.indices(), vec![5]);

    let clouds = compile_firstquad_catalog(&ctx, &base).unwrap();
    assert_eq!(clouds.indices(), vec![5, 3, 4]);
}
