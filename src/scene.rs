/// Egg position in percent of the scene width and height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EggSpot
{
    pub x: u8,
    pub y: u8,
}

#[derive(Debug)]
pub struct Scene
{
    pub id: &'static str,
    pub title: &'static str,
    pub eggs: [EggSpot; 4],
}

const fn spot(x: u8, y: u8) -> EggSpot
{
    EggSpot { x, y }
}

pub static SCENES: [Scene; 3] = [
    Scene {
        id: "park",
        title: "兒童節公園 Children's Day Park",
        eggs: [spot(20, 30), spot(60, 40), spot(80, 20), spot(40, 70)],
    },
    Scene {
        id: "nature",
        title: "清明自然場景 Qingming Countryside",
        eggs: [spot(30, 20), spot(70, 50), spot(50, 80), spot(20, 60)],
    },
    Scene {
        id: "museum",
        title: "文化展覽館 Culture Museum",
        eggs: [spot(25, 40), spot(75, 30), spot(60, 70), spot(40, 60)],
    },
];

/// Eggs across every scene; the denominator of the progress bar.
pub const TOTAL_EGGS: usize = 12;

pub fn find_scene(id: &str) -> Option<&'static Scene>
{
    SCENES.iter().find(|scene| scene.id == id)
}

pub fn egg_key(scene: &Scene, index: usize) -> String
{
    format!("{}-{}", scene.id, index)
}
