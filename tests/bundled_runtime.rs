mod support;

use std::rc::Rc;

use markdown_surface::application::{
    BundledStyleResolver, DisplayRequest, LoadPhase, MarkdownRuntime, StyleResolver,
};
use markdown_surface::config::PoolSettings;
use markdown_surface::domain::{DefaultStyle, HostPlatform, StyleSpec};
use markdown_surface::surface::BridgeChannel;
use markdown_surface::surface::bridge::{IPC_CHANNEL_REGISTRY, UPDATE_ENTRY_POINT};
use markdown_surface::surface::{SCRIPT_PLACEHOLDER, STYLESHEET_PLACEHOLDER};

use support::{Coordinator, RecordingFactory, engine, finish_load};

fn bundled_runtime(platform: HostPlatform) -> Rc<MarkdownRuntime<RecordingFactory>> {
    let settings = PoolSettings {
        initial_size: 2,
        ..PoolSettings::for_platform(platform)
    };
    Rc::new(
        MarkdownRuntime::bundled(RecordingFactory::default(), &settings)
            .expect("bundled assets should load"),
    )
}

#[test]
fn bundled_document_embeds_script_and_platform_stylesheet() {
    for platform in [HostPlatform::Desktop, HostPlatform::Mobile] {
        let runtime = bundled_runtime(platform);
        let expected_css = BundledStyleResolver::new(platform)
            .resolve(&StyleSpec::Named(DefaultStyle::Messaging))
            .expect("bundled messaging stylesheet");

        let mut coordinator = Coordinator::new(
            Rc::clone(&runtime),
            DisplayRequest::new("*hello*").with_default_style(DefaultStyle::Messaging),
        );
        let document = engine(&coordinator).loads[0].clone();

        assert!(document.contains(UPDATE_ENTRY_POINT.trim_start_matches("window.")));
        assert!(document.contains(&expected_css));
        assert!(!document.contains(SCRIPT_PLACEHOLDER));
        assert!(!document.contains(STYLESHEET_PLACEHOLDER));

        finish_load(&mut coordinator);
        assert_eq!(coordinator.phase(), LoadPhase::Ready);
        assert_eq!(engine(&coordinator).pushed_markdown(), vec!["*hello*".to_string()]);
    }
}

#[test]
fn bundled_script_gates_ipc_posts_on_registered_channels() {
    let runtime = bundled_runtime(HostPlatform::Desktop);
    let coordinator = Coordinator::new(Rc::clone(&runtime), DisplayRequest::new("x"));
    let document = &engine(&coordinator).loads[0];

    let registry = IPC_CHANNEL_REGISTRY.trim_start_matches("window.");
    assert!(document.contains(&format!("{registry};")), "registry lookup missing");
    assert!(document.contains("enabled[channel] === true"));
    assert!(!document.contains("return Boolean(window.ipc);"));
    for channel in BridgeChannel::ALL {
        assert!(document.contains(channel.name()));
    }
}

#[test]
fn bundled_pool_is_prewarmed_and_grows_on_demand() {
    let runtime = bundled_runtime(HostPlatform::Desktop);

    assert_eq!(runtime.pool().idle_len(), 2);
    assert_eq!(runtime.pool().created(), 2);

    let _a = Coordinator::new(Rc::clone(&runtime), DisplayRequest::new("a"));
    let _b = Coordinator::new(Rc::clone(&runtime), DisplayRequest::new("b"));
    let _c = Coordinator::new(Rc::clone(&runtime), DisplayRequest::new("c"));

    assert_eq!(runtime.pool().idle_len(), 0);
    assert_eq!(runtime.pool().created(), 3);
}
