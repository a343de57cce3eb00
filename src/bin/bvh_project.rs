use anyhow::Context;
use rand::{Rng, SeedableRng};
use room_bvh::data_structures::bvh_util::BvhConstructionTime;
use room_bvh::data_structures::vector::vec3f;
use room_bvh::{BvhSettings, Mesh, Room, SceneBvh, SceneSettings, Sphere, Transform};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    let rooms = if paths.is_empty() {
        procedural_rooms(8, 0x5eed)
    } else {
        paths
            .iter()
            .enumerate()
            .map(|(layer, path)| {
                let mesh = Mesh::from_obj(path).with_context(|| format!("Failed to load model {path}"))?;
                Ok(Room {
                    layer: layer as u32,
                    meshes: vec![mesh],
                    spheres: vec![],
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    let triangles: usize = rooms.iter().map(|room| room.triangle_count()).sum();
    println!("{} rooms, {} triangles", rooms.len(), triangles);

    for max_depth in [4, 8, 16] {
        for use_full_objects in [false, true] {
            for parallel in [false, true] {
                let settings = SceneSettings {
                    use_bvh: true,
                    bvh: BvhSettings {
                        max_depth,
                        use_full_objects,
                    },
                    parallel,
                };
                let (time, scene) = run_scene(&rooms, &settings, 20);
                println!(
                    "depth {max_depth:2}, {}, {}: {} nodes, {} wrappers, reached {}, avg {:?}",
                    if use_full_objects { "objects  " } else { "triangles" },
                    if parallel { "MT" } else { "ST" },
                    scene.num_nodes(),
                    scene.num_wrappers(),
                    scene.max_depth_reached,
                    time.total(),
                );
                time.display(&format!("depth {max_depth}, objects {use_full_objects}, parallel {parallel}"));
            }
        }
    }
    Ok(())
}

fn run_scene(rooms: &[Room], settings: &SceneSettings, runs: u32) -> (BvhConstructionTime, SceneBvh) {
    let mut total = BvhConstructionTime::default();
    let mut scene = SceneBvh::default();
    for _ in 0..runs {
        scene = SceneBvh::build(rooms, settings);
        total += scene.time;
    }
    total /= runs;
    (total, scene)
}

/// Rooms of randomly placed triangle soups and spheres
fn procedural_rooms(count: u32, seed: u64) -> Vec<Room> {
    let mut rng = rand_pcg::Pcg32::seed_from_u64(seed);
    (0..count)
        .map(|layer| {
            let meshes = (0..rng.gen_range(4..16))
                .map(|_| {
                    let position = vec3f(
                        rng.gen_range(-100.0..100.0),
                        rng.gen_range(-20.0..20.0),
                        rng.gen_range(-100.0..100.0),
                    );
                    let triangles: u32 = rng.gen_range(16..512);
                    let vertices = (0..triangles * 3)
                        .map(|_| {
                            vec3f(
                                rng.gen_range(-5.0..5.0),
                                rng.gen_range(-5.0..5.0),
                                rng.gen_range(-5.0..5.0),
                            )
                        })
                        .collect();
                    let indices = (0..triangles).map(|i| [i * 3, i * 3 + 1, i * 3 + 2]).collect();
                    Mesh::new(vertices, vec![], indices, Transform::from_position(position))
                })
                .collect();
            let spheres = (0..rng.gen_range(0..32))
                .map(|_| {
                    let center = vec3f(
                        rng.gen_range(-100.0..100.0),
                        rng.gen_range(-20.0..20.0),
                        rng.gen_range(-100.0..100.0),
                    );
                    Sphere::new(center, rng.gen_range(0.5..6.0))
                })
                .collect();
            Room { layer, meshes, spheres }
        })
        .collect()
}
