use approx::assert_relative_eq;
use glam::{Mat2, Vec2, Vec3A};
use kornia_graph::{EdgeDirection, EdgeIntrinsics, Graph, Sim3, Sim3Vertex};
use kornia_loop::{
    inv_level_sigma_sq, Camera, EquirectangularCamera, FisheyeCamera, KeyPoint, Landmark,
    MutualReprojConfig, MutualReprojEdge, MutualReprojEdges, PerspectiveCamera, Shot,
};

struct Keyframe {
    camera: Camera,
    keypts: Vec<KeyPoint>,
    inv_level_sigma_sq: Vec<f32>,
}

impl Shot for Keyframe {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn undist_keypoints(&self) -> &[KeyPoint] {
        &self.keypts
    }

    fn inv_level_sigma_sq(&self) -> &[f32] {
        &self.inv_level_sigma_sq
    }
}

struct MapPoint(Vec3A);

impl Landmark for MapPoint {
    fn pos_in_world(&self) -> Vec3A {
        self.0
    }
}

#[test]
fn perspective_to_equirectangular_pair() {
    let shot1 = Keyframe {
        camera: Camera::Perspective(PerspectiveCamera::new(640, 480, 500.0, 500.0, 320.0, 320.0)),
        keypts: vec![KeyPoint::new(330.0, 240.0, 0)],
        inv_level_sigma_sq: inv_level_sigma_sq(2.0, 4),
    };
    let shot2 = Keyframe {
        camera: Camera::Equirectangular(EquirectangularCamera::new(1024, 512)),
        keypts: vec![KeyPoint::new(0.0, 0.0, 0), KeyPoint::new(512.0, 256.0, 1)],
        inv_level_sigma_sq: inv_level_sigma_sq(2.0, 4),
    };
    let lm1 = MapPoint(Vec3A::new(0.0, 0.0, 5.0));
    let lm2 = MapPoint(Vec3A::new(1.0, 0.0, 6.0));

    let mut graph = Graph::new();
    let vtx = graph.add_vertex(Sim3Vertex::new(Sim3::IDENTITY));

    let pair = MutualReprojEdge::new(&mut graph, &shot1, 0, &lm1, &shot2, 1, &lm2, vtx, 2.0)
        .expect("both camera models are supported");

    let forward = &graph[pair.edges.forward];
    assert_eq!(forward.direction(), EdgeDirection::Forward);
    assert_eq!(
        forward.intrinsics(),
        EdgeIntrinsics::Perspective {
            fx: 500.0,
            fy: 500.0,
            cx: 320.0,
            cy: 320.0
        }
    );
    assert_eq!(forward.measurement(), Vec2::new(330.0, 240.0));
    assert_eq!(forward.information(), Mat2::IDENTITY * 1.0);
    assert_eq!(forward.point(), Vec3A::new(1.0, 0.0, 6.0));
    assert_eq!(forward.robust_kernel().map(|k| k.delta()), Some(2.0));

    let backward = &graph[pair.edges.backward];
    assert_eq!(backward.direction(), EdgeDirection::Backward);
    assert_eq!(
        backward.intrinsics(),
        EdgeIntrinsics::Equirectangular {
            cols: 1024.0,
            rows: 512.0
        }
    );
    assert_eq!(backward.measurement(), Vec2::new(512.0, 256.0));
    assert_eq!(backward.information(), Mat2::IDENTITY * 0.25);
    assert_eq!(backward.point(), Vec3A::new(0.0, 0.0, 5.0));
    assert_eq!(backward.robust_kernel().map(|k| k.delta()), Some(2.0));

    assert_eq!(forward.vertex(), Some(vtx));
    assert_eq!(backward.vertex(), Some(vtx));
    assert!(pair.is_inlier(&graph));
}

#[test]
fn correspondences_share_one_transform_vertex() {
    let camera = Camera::Fisheye(FisheyeCamera::new(1280, 720, 400.0, 400.0, 640.0, 360.0));
    let keypts: Vec<KeyPoint> = (0..10)
        .map(|i| KeyPoint::new(100.0 + i as f32, 200.0, i % 3))
        .collect();
    let shot1 = Keyframe {
        camera: camera.clone(),
        keypts: keypts.clone(),
        inv_level_sigma_sq: inv_level_sigma_sq(1.2, 8),
    };
    let shot2 = Keyframe {
        camera,
        keypts,
        inv_level_sigma_sq: inv_level_sigma_sq(1.2, 8),
    };
    let landmarks: Vec<MapPoint> = (0..10)
        .map(|i| MapPoint(Vec3A::new(i as f32, 1.0, 4.0)))
        .collect();

    let config: MutualReprojConfig =
        serde_json::from_str(r#"{"chi_sq_threshold": 5.991}"#).unwrap();
    config.validate().unwrap();
    let mut graph = Graph::new();
    let vtx = graph.add_vertex(Sim3Vertex::new(Sim3::IDENTITY).with_fixed_scale(config.fix_scale));

    let mut edges = MutualReprojEdges::new();
    for (idx, lm) in landmarks.iter().enumerate() {
        let other = &landmarks[(idx + 1) % landmarks.len()];
        let pair = MutualReprojEdge::new(
            &mut graph,
            &shot1,
            idx,
            lm,
            &shot2,
            idx,
            other,
            vtx,
            config.robust_delta(),
        )
        .unwrap();
        edges.push(pair);
    }

    assert_eq!(graph.num_vertices(), 1);
    assert_eq!(graph.num_edges(), 20);
    for pair in &edges {
        let forward = &graph[pair.edges.forward];
        let backward = &graph[pair.edges.backward];
        assert_eq!(forward.vertex(), Some(vtx));
        assert_eq!(backward.vertex(), Some(vtx));
        assert_eq!(forward.point(), pair.lm2.pos_in_world());
        assert_eq!(backward.point(), pair.lm1.pos_in_world());
        assert_eq!(
            forward.measurement(),
            pair.shot1.undist_keypoints()[pair.idx1].pt
        );
        assert_eq!(
            backward.measurement(),
            pair.shot2.undist_keypoints()[pair.idx2].pt
        );

        let octave = pair.shot1.undist_keypoints()[pair.idx1].octave;
        let expected = pair.shot1.inv_level_sigma_sq()[octave];
        assert_relative_eq!(forward.information().col(0).x, expected);
        assert_relative_eq!(forward.information().col(1).y, expected);
        assert_eq!(forward.information().col(0).y, 0.0);
        assert!(expected > 0.0);
        assert_relative_eq!(
            forward.robust_kernel().map(|k| k.delta()).unwrap_or_default(),
            5.991f32.sqrt()
        );
    }

    // one round of outlier rejection driven by externally computed errors
    let num_outliers = edges.reclassify(&mut graph, config.chi_sq_threshold, |id| {
        if id.index() < 4 {
            50.0
        } else {
            1.0
        }
    });
    assert_eq!(num_outliers, 2);
    assert_eq!(graph.num_active_edges(), 16);

    assert_eq!(edges.discard_outliers(&mut graph), 2);
    assert_eq!(graph.num_edges(), 16);
    assert_eq!(edges.inlier_matches(&graph).len(), 8);
}
