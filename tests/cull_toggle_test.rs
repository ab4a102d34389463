use moving_sphere_box::{context::CullMode, scene::is_cull_toggle_key};
use winit::{
    event::ElementState,
    keyboard::{Key, NamedKey},
};

#[test]
fn lower_and_upper_case_w_toggle() {
    assert!(is_cull_toggle_key(&Key::Character("w".into()), ElementState::Pressed));
    assert!(is_cull_toggle_key(&Key::Character("W".into()), ElementState::Pressed));
}

#[test]
fn releases_and_other_keys_do_not_toggle() {
    assert!(!is_cull_toggle_key(&Key::Character("w".into()), ElementState::Released));
    assert!(!is_cull_toggle_key(&Key::Character("W".into()), ElementState::Released));
    assert!(!is_cull_toggle_key(&Key::Character("q".into()), ElementState::Pressed));
    assert!(!is_cull_toggle_key(&Key::Character("ww".into()), ElementState::Pressed));
    assert!(!is_cull_toggle_key(&Key::Named(NamedKey::Escape), ElementState::Pressed));
}

#[test]
fn culling_starts_off_and_toggles_back_and_forth() {
    let mode = CullMode::default();
    assert_eq!(mode, CullMode::None);
    assert_eq!(mode.toggled(), CullMode::Back);
    assert_eq!(mode.toggled().toggled(), CullMode::None);
    assert_eq!(CullMode::Back.toggled().toggled(), CullMode::Back);
}
