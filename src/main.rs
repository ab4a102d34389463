use moving_sphere_box::{
    config::Config,
    flow,
    logging::init_logging,
    scene::MovingSphereBox,
};

fn main() -> anyhow::Result<()> {
    let config = Config::default();
    init_logging(config.logging.clone());

    let scene = MovingSphereBox::constructor(config.scene.clone());
    flow::run(config, vec![scene])
}
