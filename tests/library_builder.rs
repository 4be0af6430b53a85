mod common;

use common::{ClassPathFixture, FakeLoader, archive, init_logging, write_jar};
use kodegen_bundler_archive::{
    ArchiveBuilder, ArchivePath, ClassContainingArchiveBuilder, Error, library_with,
};

fn classes() -> ClassPathFixture {
    ClassPathFixture::new()
        .with_file("com/acme/Alpha.class", "alpha")
        .with_file("com/acme/Alpha$Inner.class", "alpha-inner")
        .with_file("com/acme/Beta.class", "beta")
        .with_file("com/acme/util/Gamma.class", "gamma")
        .with_file("config/app.properties", "mode=test")
        .with_file("persistence.xml", "<persistence/>")
}

fn text(archive: &kodegen_bundler_archive::Archive, path: &str) -> String {
    let asset = archive.get(&ArchivePath::new(path).unwrap()).unwrap();
    String::from_utf8(asset.as_bytes().unwrap().to_vec()).unwrap()
}

#[test]
fn classes_and_resolved_dependency_end_to_end() {
    init_logging();
    let class_path = classes();
    let repo = tempfile::tempdir().unwrap();
    let f = write_jar(repo.path(), "f.jar", &[("/org/dep/F.class", "f")]);

    let jar = library_with("app.lib", class_path.settings())
        .unwrap()
        .append_classes(["com.acme.Alpha", "com.acme.Beta"])
        .unwrap()
        .resolve_dependencies_with("project.toml", FakeLoader::new().with_artifact("g:a", vec![f]))
        .resolve_dependency("g", "a")
        .apply()
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(jar.name(), "app.lib");
    assert!(jar.contains("/com/acme/Alpha.class"));
    assert!(jar.contains("/com/acme/Alpha$Inner.class"));
    assert!(jar.contains("/com/acme/Beta.class"));
    assert!(jar.contains("/org/dep/F.class"));

    let manifest = String::from_utf8(jar.manifest().unwrap().to_vec()).unwrap();
    assert!(manifest.starts_with("Manifest-Version: 1.0"));
    assert!(manifest.contains("Created-By: integration-tests"));
}

#[test]
fn libraries_merge_in_argument_order() {
    init_logging();
    let first = archive("one.jar", &[("/shared.txt", "one"), ("/one.txt", "1")]);
    let second = archive("two.jar", &[("/shared.txt", "two"), ("/two.txt", "2")]);

    let forward = library_with("app.jar", classes().settings())
        .unwrap()
        .append_libraries([first.clone(), second.clone()])
        .unwrap()
        .build()
        .unwrap();
    let reverse = library_with("app.jar", classes().settings())
        .unwrap()
        .append_libraries([second, first])
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(text(&forward, "/shared.txt"), "two");
    assert_eq!(text(&reverse, "/shared.txt"), "one");
    assert!(forward.contains("/one.txt") && forward.contains("/two.txt"));
    assert!(forward.manifest().is_some());
}

#[test]
fn later_append_overwrites_same_path() {
    init_logging();
    let class_path = classes();

    let jar = library_with("app.jar", class_path.settings())
        .unwrap()
        .append_classes(["com.acme.Beta"])
        .unwrap()
        .append_libraries([archive("patch.jar", &[("/com/acme/Beta.class", "patched")])])
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(text(&jar, "/com/acme/Beta.class"), "patched");
}

#[test]
fn packages_recursive_and_flat() {
    init_logging();
    let class_path = classes();

    let deep = library_with("deep.jar", class_path.settings())
        .unwrap()
        .append_packages_recursively(["com.acme"])
        .unwrap()
        .build()
        .unwrap();
    let flat = library_with("flat.jar", class_path.settings())
        .unwrap()
        .append_packages_non_recursively(["com.acme"])
        .unwrap()
        .build()
        .unwrap();

    assert!(deep.contains("/com/acme/util/Gamma.class"));
    assert!(deep.contains("/com/acme/Alpha.class"));
    assert!(!flat.contains("/com/acme/util/Gamma.class"));
    assert!(flat.contains("/com/acme/Beta.class"));
}

#[test]
fn resources_default_to_their_own_path() {
    init_logging();
    let class_path = classes();

    let jar = library_with("app.jar", class_path.settings())
        .unwrap()
        .append_resource("config/app.properties")
        .unwrap()
        .append_resource_at("config/app.properties", "defaults.properties")
        .unwrap()
        .append_manifest_resource("persistence.xml", "persistence.xml")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(text(&jar, "/config/app.properties"), "mode=test");
    assert_eq!(text(&jar, "/defaults.properties"), "mode=test");
    assert_eq!(text(&jar, "/META-INF/persistence.xml"), "<persistence/>");
}

#[test]
fn missing_class_leaves_builder_error() {
    init_logging();
    let class_path = classes();

    let err = library_with("app.jar", class_path.settings())
        .unwrap()
        .append_classes(["com.acme.Alpha", "com.acme.Missing"])
        .unwrap_err();

    assert!(matches!(err, Error::ClassNotFound { ref class, .. } if class == "com.acme.Missing"));
}

#[test]
fn invalid_names_are_rejected() {
    init_logging();
    for name in ["", "..", ".", "lib/app.jar"] {
        assert!(
            matches!(
                library_with(name, classes().settings()),
                Err(Error::InvalidName { .. })
            ),
            "{name:?}"
        );
    }
}
