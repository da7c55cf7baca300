use detgeo::prelude::*;
use nalgebra::Vector3;

fn box_solid(hw: f64, hh: f64, hl: f64) -> Solid {
    Solid::Box { half_width: hw, half_height: hh, half_length: hl }
}

fn wire_at(x: f64, y: f64, z: f64) -> WireGeo {
    WireGeo::new(LocalTransform::from_translation(Vector3::new(x, y, z)), 2.0)
}

fn plane_at(name: &str, x: f64, y: f64, z: f64, wires: Vec<WireGeo>) -> PlaneGeo {
    PlaneGeo::new(
        name,
        LocalTransform::from_translation(Vector3::new(x, y, z)),
        &box_solid(0.1, 2.0, 5.0),
        wires,
    )
    .unwrap()
}

fn tpc_with_planes(name: &str, x: f64, drift: DriftDirection, planes: Vec<PlaneGeo>) -> TpcGeo {
    TpcGeo::new(
        name,
        LocalTransform::from_translation(Vector3::new(x, 0.0, 0.0)),
        &box_solid(2.0, 2.0, 5.0),
        drift,
        planes,
    )
    .unwrap()
}

fn simple_tpc(name: &str, x: f64, drift: DriftDirection) -> TpcGeo {
    tpc_with_planes(
        name,
        x,
        drift,
        vec![plane_at(&format!("{name}_p"), x, 0.0, 0.0, vec![wire_at(x, 0.0, 0.0)])],
    )
}

fn cryostat_with_tpcs(name: &str, x: f64, tpcs: Vec<TpcGeo>) -> CryostatGeo {
    CryostatGeo::new(
        name,
        LocalTransform::from_translation(Vector3::new(x, 0.0, 0.0)),
        &box_solid(10.0, 5.0, 10.0),
        tpcs,
        Vec::new(),
    )
    .unwrap()
}

#[test]
fn cryostats_sort_by_world_x() {
    let geo = GeometryCore::new(
        vec![
            cryostat_with_tpcs("volCryostatB", 30.0, vec![simple_tpc("tB", 30.0, DriftDirection::NegX)]),
            cryostat_with_tpcs("volCryostatA", -30.0, vec![simple_tpc("tA", -30.0, DriftDirection::NegX)]),
        ],
        Vec::new(),
        &StandardSorter,
    )
    .unwrap();
    assert_eq!(geo.cryostat(0).unwrap().name(), "volCryostatA");
    assert_eq!(geo.cryostat(1).unwrap().name(), "volCryostatB");
    assert_eq!(geo.cryostat(0).unwrap().id(), Some(CryostatId(0)));
    geo.validate_invariants().unwrap();
}

#[test]
fn tpcs_sort_by_world_x_within_their_cryostat() {
    let geo = GeometryCore::new(
        vec![cryostat_with_tpcs(
            "volCryostat0",
            0.0,
            vec![
                simple_tpc("tpc_high", 5.0, DriftDirection::NegX),
                simple_tpc("tpc_low", -5.0, DriftDirection::NegX),
            ],
        )],
        Vec::new(),
        &StandardSorter,
    )
    .unwrap();
    let cryo = geo.cryostat(0).unwrap();
    assert_eq!(cryo.tpc(0).unwrap().name(), "tpc_low");
    assert_eq!(cryo.tpc(1).unwrap().name(), "tpc_high");
}

#[test]
fn planes_increase_along_negative_drift() {
    // Base order is descending X: with negative drift the highest-X plane
    // comes first.
    let planes = vec![
        plane_at("p_low", -1.0, 0.0, 0.0, vec![wire_at(-1.0, 0.0, 0.0)]),
        plane_at("p_high", 1.0, 0.0, 0.0, vec![wire_at(1.0, 0.0, 0.0)]),
    ];
    let geo = GeometryCore::new(
        vec![cryostat_with_tpcs(
            "volCryostat0",
            0.0,
            vec![tpc_with_planes("tpc0", 0.0, DriftDirection::NegX, planes)],
        )],
        Vec::new(),
        &StandardSorter,
    )
    .unwrap();
    let tpc = geo.cryostat(0).unwrap().tpc(0).unwrap();
    assert_eq!(tpc.plane(0).unwrap().name(), "p_high");
    assert_eq!(tpc.plane(1).unwrap().name(), "p_low");
}

#[test]
fn positive_drift_reverses_the_plane_order() {
    let planes = vec![
        plane_at("p_low", -1.0, 0.0, 0.0, vec![wire_at(-1.0, 0.0, 0.0)]),
        plane_at("p_high", 1.0, 0.0, 0.0, vec![wire_at(1.0, 0.0, 0.0)]),
    ];
    let geo = GeometryCore::new(
        vec![cryostat_with_tpcs(
            "volCryostat0",
            0.0,
            vec![tpc_with_planes("tpc0", 0.0, DriftDirection::PosX, planes)],
        )],
        Vec::new(),
        &StandardSorter,
    )
    .unwrap();
    let tpc = geo.cryostat(0).unwrap().tpc(0).unwrap();
    assert_eq!(tpc.plane(0).unwrap().name(), "p_low");
    assert_eq!(tpc.plane(1).unwrap().name(), "p_high");
}

#[test]
fn unknown_drift_direction_is_fatal_at_sort_time() {
    let err = GeometryCore::new(
        vec![cryostat_with_tpcs(
            "volCryostat0",
            0.0,
            vec![simple_tpc("tpc_nodrift", 0.0, DriftDirection::Unknown)],
        )],
        Vec::new(),
        &StandardSorter,
    )
    .unwrap_err();
    assert_eq!(err, GeometryError::UnknownDriftDirection { tpc: "tpc_nodrift".into() });
}

#[test]
fn near_tie_in_plane_x_falls_through_to_z_then_y() {
    // X within the 0.001 tolerance; Z decides.
    let planes = vec![
        plane_at("p_far_z", 0.0, 0.0, 3.0, vec![wire_at(0.0, 0.0, 3.0)]),
        plane_at("p_near_z", 0.0004, 0.0, -3.0, vec![wire_at(0.0004, 0.0, -3.0)]),
    ];
    let geo = GeometryCore::new(
        vec![cryostat_with_tpcs(
            "volCryostat0",
            0.0,
            vec![tpc_with_planes("tpc0", 0.0, DriftDirection::NegX, planes)],
        )],
        Vec::new(),
        &StandardSorter,
    )
    .unwrap();
    let tpc = geo.cryostat(0).unwrap().tpc(0).unwrap();
    assert_eq!(tpc.plane(0).unwrap().name(), "p_near_z");
    assert_eq!(tpc.plane(1).unwrap().name(), "p_far_z");
}

#[test]
fn wires_sort_by_z_then_y_then_x() {
    let wires = vec![
        wire_at(0.0, 1.0, 2.0),
        wire_at(0.0, -1.0, 2.0005), // Z ties with the first within tolerance
        wire_at(0.0, 0.0, -2.0),
    ];
    let geo = GeometryCore::new(
        vec![cryostat_with_tpcs(
            "volCryostat0",
            0.0,
            vec![tpc_with_planes(
                "tpc0",
                0.0,
                DriftDirection::NegX,
                vec![plane_at("p0", 0.0, 0.0, 0.0, wires)],
            )],
        )],
        Vec::new(),
        &StandardSorter,
    )
    .unwrap();
    let plane = geo.cryostat(0).unwrap().tpc(0).unwrap().plane(0).unwrap();
    let centers: Vec<_> = plane.wires().iter().map(|w| w.center()).collect();
    assert_eq!(centers[0].z, -2.0);
    // The two near-tied wires order by Y.
    assert_eq!(centers[1].y, -1.0);
    assert_eq!(centers[2].y, 1.0);
}

#[test]
fn aux_dets_sort_by_name_suffix() {
    let module = |name: &str| {
        AuxDetGeo::new(
            name,
            LocalTransform::identity(),
            &box_solid(1.0, 1.0, 1.0),
            Vec::new(),
        )
        .unwrap()
    };
    let geo = GeometryCore::new(
        vec![cryostat_with_tpcs(
            "volCryostat0",
            0.0,
            vec![simple_tpc("t0", 0.0, DriftDirection::NegX)],
        )],
        vec![module("volAuxDet10"), module("volAuxDet2"), module("volAuxDet1")],
        &StandardSorter,
    )
    .unwrap();
    let names: Vec<_> = geo.aux_dets().iter().map(|ad| ad.name().to_owned()).collect();
    assert_eq!(names, ["volAuxDet1", "volAuxDet2", "volAuxDet10"]);
    assert_eq!(geo.aux_det(2).unwrap().id(), Some(AuxDetId(2)));
}

#[test]
fn reindex_is_idempotent_between_sorts() {
    let mut geo = GeometryCore::new(
        vec![
            cryostat_with_tpcs(
                "volCryostat1",
                10.0,
                vec![
                    simple_tpc("t1a", 8.0, DriftDirection::NegX),
                    simple_tpc("t1b", 12.0, DriftDirection::NegX),
                ],
            ),
            cryostat_with_tpcs(
                "volCryostat0",
                -10.0,
                vec![simple_tpc("t0a", -10.0, DriftDirection::NegX)],
            ),
        ],
        Vec::new(),
        &StandardSorter,
    )
    .unwrap();

    let snapshot = |geo: &GeometryCore| {
        geo.cryostats()
            .iter()
            .map(|c| {
                (
                    c.id(),
                    c.tpcs()
                        .iter()
                        .map(|t| (t.id(), t.planes().iter().map(PlaneGeo::id).collect::<Vec<_>>()))
                        .collect::<Vec<_>>(),
                )
            })
            .collect::<Vec<_>>()
    };

    let first = snapshot(&geo);
    geo.reindex();
    assert_eq!(first, snapshot(&geo));
    geo.validate_invariants().unwrap();
}

#[test]
fn child_ids_embed_the_parent_id_as_prefix() {
    let geo = GeometryCore::new(
        vec![cryostat_with_tpcs(
            "volCryostat0",
            0.0,
            vec![simple_tpc("t0", 0.0, DriftDirection::NegX)],
        )],
        Vec::new(),
        &StandardSorter,
    )
    .unwrap();
    let cryo = geo.cryostat(0).unwrap();
    let tpc = cryo.tpc(0).unwrap();
    let plane = tpc.plane(0).unwrap();
    let wire = plane.wire(0).unwrap();
    assert_eq!(tpc.id().unwrap().cryostat, cryo.id().unwrap());
    assert_eq!(plane.id().unwrap().tpc, tpc.id().unwrap());
    assert_eq!(wire.id().unwrap().plane, plane.id().unwrap());
}
