//! End-to-end scenarios over real template trees on disk.

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use pageweave::{App, ControllerRegistry, Engine, PageView, ResolveErrorKind, Settings};
use pageweave_dispatch::{DispatchError, Params, Route};
use pageweave_render::tag_values;

struct Fixture {
    app_dir: TempDir,
    fw_dir: TempDir,
    settings: Settings,
}

impl Fixture {
    /// A settings tree with one configured route (home/index) mapping the
    /// `header` tag to the `home` controller.
    fn new() -> Self {
        let app_dir = TempDir::new().unwrap();
        let fw_dir = TempDir::new().unwrap();
        fs::create_dir_all(fw_dir.path().join("default")).unwrap();

        let yaml = format!(
            r#"
app_name: integration
app_template_dir: {}
fw_template_dir: {}/{{template_library}}
routes:
  - controller: home
    action: index
    templates:
      - {{ tag: header, handler: home, file: header.html }}
"#,
            app_dir.path().display(),
            fw_dir.path().display()
        );
        let settings = serde_yaml::from_str(&yaml).unwrap();
        Self {
            app_dir,
            fw_dir,
            settings,
        }
    }

    fn write_app(&self, name: &str, contents: &str) {
        fs::write(self.app_dir.path().join(name), contents).unwrap();
    }

    fn write_fw(&self, name: &str, contents: &str) {
        fs::write(self.fw_dir.path().join("default").join(name), contents).unwrap();
    }

    fn registry_with_home(&self) -> ControllerRegistry {
        let mut registry = ControllerRegistry::new();
        registry.register_fn("home", |_, _| Ok(tag_values([("header-text", "Welcome")])));
        registry
    }
}

#[test]
fn application_template_shadows_framework_template() {
    let fx = Fixture::new();
    fx.write_fw("page.html", "framework");
    fx.write_app("page.html", "application");

    let engine = Engine::new(fx.settings.clone(), ControllerRegistry::new());
    let out = engine
        .resolver_for(&Route::new("home", "index"))
        .resolve("page")
        .unwrap();
    assert_eq!(out, "application");
}

#[test]
fn framework_template_serves_as_fallback() {
    let fx = Fixture::new();
    fx.write_fw("footer.html", "<p>from the library</p>");

    let engine = Engine::new(fx.settings.clone(), ControllerRegistry::new());
    let out = engine
        .resolver_for(&Route::new("home", "index"))
        .resolve("footer")
        .unwrap();
    assert_eq!(out, "<p>from the library</p>");
}

#[test]
fn mapped_and_unmapped_tags_compose_one_page() {
    let fx = Fixture::new();
    fx.write_app("basepage.html", "{header}\n{footer}");
    fx.write_app("header.html", "<h1>{header-text}</h1>");
    fx.write_app("footer.html", "<p>bye</p>");

    let engine = Engine::new(fx.settings.clone(), fx.registry_with_home());
    let out = engine
        .resolver_for(&Route::new("home", "index"))
        .resolve("basepage")
        .unwrap();
    assert_eq!(out, "<h1>Welcome</h1>\n<p>bye</p>");
}

#[test]
fn mappings_are_scoped_to_their_route() {
    let fx = Fixture::new();
    fx.write_app("header.html", "<h1>{header-text}</h1>");

    let engine = Engine::new(fx.settings.clone(), fx.registry_with_home());

    // Another route has no mapping for `header`, so the default fallback
    // applies and the uncovered child tag fails resolution.
    let err = engine
        .resolver_for(&Route::new("blog", "list"))
        .resolve("header")
        .unwrap_err();
    assert_eq!(err.tag, "header-text");
    assert!(matches!(err.kind, ResolveErrorKind::TemplateMissing(_)));
}

#[test]
fn braces_with_spaces_survive_untouched() {
    let fx = Fixture::new();
    fx.write_app(
        "snippet.html",
        "body { margin: 0 } and {a b} stay, {leaf} goes",
    );
    fx.write_app("leaf.html", "resolved");

    let engine = Engine::new(fx.settings.clone(), ControllerRegistry::new());
    let out = engine
        .resolver_for(&Route::new("home", "index"))
        .resolve("snippet")
        .unwrap();
    assert_eq!(out, "body { margin: 0 } and {a b} stay, resolved goes");
}

#[test]
fn self_referential_template_fails_instead_of_looping() {
    let fx = Fixture::new();
    fx.write_app("loop.html", "{loop}");

    let engine = Engine::new(fx.settings.clone(), ControllerRegistry::new());
    let err = engine
        .resolver_for(&Route::new("home", "index"))
        .resolve("loop")
        .unwrap_err();
    assert!(matches!(err.kind, ResolveErrorKind::CycleOrDepthExceeded));
}

#[test]
fn chains_past_the_depth_ceiling_fail() {
    let fx = Fixture::new();
    // A strictly deeper chain of distinct tags, so no revisit occurs and
    // only the depth ceiling can stop it.
    let depth = pageweave::MAX_RESOLVE_DEPTH + 8;
    for i in 0..depth {
        fx.write_app(&format!("c{}.html", i), &format!("{{c{}}}", i + 1));
    }
    fx.write_app(&format!("c{}.html", depth), "bottom");

    let engine = Engine::new(fx.settings.clone(), ControllerRegistry::new());
    let err = engine
        .resolver_for(&Route::new("home", "index"))
        .resolve("c0")
        .unwrap_err();
    assert!(matches!(err.kind, ResolveErrorKind::CycleOrDepthExceeded));
}

#[test]
fn deep_but_finite_chains_resolve() {
    let fx = Fixture::new();
    // a0 -> a1 -> ... -> a10 -> leaf text.
    for i in 0..10 {
        fx.write_app(&format!("a{}.html", i), &format!("{{a{}}}", i + 1));
    }
    fx.write_app("a10.html", "bottom");

    let engine = Engine::new(fx.settings.clone(), ControllerRegistry::new());
    let out = engine
        .resolver_for(&Route::new("home", "index"))
        .resolve("a0")
        .unwrap();
    assert_eq!(out, "bottom");
}

#[test]
fn nested_values_render_through_their_tag_template() {
    let fx = Fixture::new();
    fx.write_app("profile.html", "{user}");
    fx.write_app("user.html", "{name} <{email}>");

    let mut registry = ControllerRegistry::new();
    registry.register_fn("people", |_, _| {
        let mut values = pageweave_render::TagValues::new();
        values.insert(
            "user".to_string(),
            pageweave_render::TagValue::Nested(
                [
                    ("name".to_string(), "Ada".to_string()),
                    ("email".to_string(), "ada@example.com".to_string()),
                ]
                .into_iter()
                .collect(),
            ),
        );
        Ok(values)
    });

    let mut settings = fx.settings.clone();
    settings.routes[0].templates[0] = pageweave::TemplateMapping {
        tag: "profile".to_string(),
        handler: "people".to_string(),
        file: "profile.html".to_string(),
    };

    let engine = Engine::new(settings, registry);
    let out = engine
        .resolver_for(&Route::new("home", "index"))
        .resolve("profile")
        .unwrap();
    assert_eq!(out, "Ada <ada@example.com>");
}

#[test]
fn page_view_composes_through_resolved_slots() {
    let fx = Fixture::new();
    fx.write_app("page.html", "<title>{title}</title>{header}{body}{footer}");

    struct About {
        engine: Arc<Engine>,
    }

    impl PageView for About {
        fn title(&self) -> String {
            "About".to_string()
        }

        fn header(&self) -> String {
            self.engine
                .resolver_for(&Route::new("home", "index"))
                .resolve("header")
                .unwrap_or_default()
        }

        fn body(&self) -> String {
            "<p>who we are</p>".to_string()
        }
    }

    fx.write_app("header.html", "<h1>{header-text}</h1>");

    let engine = Arc::new(Engine::new(fx.settings.clone(), fx.registry_with_home()));
    let page = About {
        engine: engine.clone(),
    };
    let html = page.generate(&engine.generator()).unwrap();
    assert_eq!(html, "<title>About</title><h1>Welcome</h1><p>who we are</p>");
}

#[test]
fn full_request_pipeline_serves_a_page() {
    let fx = Fixture::new();
    fx.write_app("basepage.html", "{header}{greeting}");
    fx.write_app("header.html", "<h1>{header-text}</h1>");
    fx.write_app("greeting.html", "<p>static greeting</p>");

    let app = App::builder(fx.settings.clone())
        .controllers(fx.registry_with_home())
        .action(
            Route::new("home", "index"),
            Vec::<String>::new(),
            |ctx, _args| Ok(ctx.resolve("basepage")?),
        )
        .build();

    let html = app.handle_path("home/index", Params::new()).unwrap();
    assert_eq!(
        html,
        "<h1>Welcome</h1><p>static greeting</p>"
    );
}

#[test]
fn request_parameters_reach_the_action_in_key_order() {
    let fx = Fixture::new();
    let app = App::builder(fx.settings.clone())
        .action(
            Route::new("home", "index"),
            ["last", "first"],
            |_ctx, args| Ok(format!("{} {}", args[0], args[1])),
        )
        .build();

    let params: Params = [("last", "Lovelace"), ("first", "Ada")].into_iter().collect();
    // Sorted key order: first, last.
    let out = app.handle_path("home/index", params).unwrap();
    assert_eq!(out, "Ada Lovelace");
}

#[test]
fn resolution_failure_fails_the_whole_request() {
    let fx = Fixture::new();
    fx.write_app("basepage.html", "{header}{absent}");
    fx.write_app("header.html", "<h1>{header-text}</h1>");

    let app = App::builder(fx.settings.clone())
        .controllers(fx.registry_with_home())
        .action(
            Route::new("home", "index"),
            Vec::<String>::new(),
            |ctx, _args| Ok(ctx.resolve("basepage")?),
        )
        .build();

    let err = app.handle_path("home/index", Params::new()).unwrap_err();
    assert!(matches!(err, DispatchError::Handler { .. }));
    assert!(format!("{:#}", anyhow::Error::from(err)).contains("absent"));
}

#[test]
fn input_sanitization_defuses_markup_in_parameters() {
    let fx = Fixture::new();
    let app = App::builder(fx.settings.clone())
        .action(Route::new("home", "index"), ["name"], |_ctx, args| {
            Ok(format!("<p>Hello {}</p>", args[0]))
        })
        .build();

    let params: Params = [("name", "<script>alert(1)</script>")].into_iter().collect();
    let html = app.handle_path("home/index", params).unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn per_call_library_override_switches_framework_dir() {
    let fx = Fixture::new();
    fs::create_dir_all(fx.fw_dir.path().join("dark")).unwrap();
    fx.write_fw("panel.html", "light panel");
    fs::write(
        fx.fw_dir.path().join("dark").join("panel.html"),
        "dark panel",
    )
    .unwrap();

    let engine = Engine::new(fx.settings.clone(), ControllerRegistry::new());
    let values = pageweave_render::TagValues::new();
    assert_eq!(
        engine
            .generator()
            .generate_template("panel.html", Some(&values), None)
            .unwrap(),
        "light panel"
    );
    assert_eq!(
        engine
            .generator()
            .generate_template("panel.html", Some(&values), Some("dark"))
            .unwrap(),
        "dark panel"
    );
}
