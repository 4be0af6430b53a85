mod common;

use common::{archive, init_logging};
use kodegen_bundler_archive::{
    Archive, ArchiveBuilder, ArchiveShape, Error, enterprise, web_deployable,
};

#[test]
fn module_list_contains_exactly_the_module() {
    init_logging();
    let module = archive("m.jar", &[("/m/M.class", "m")]);

    let ear = enterprise("app.ear")
        .unwrap()
        .append_module(module.clone())
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(ear.modules(), vec![&module]);
    assert!(ear.libraries().is_empty());
}

#[test]
fn typed_archives_are_accepted_as_modules() {
    init_logging();
    let war = web_deployable("shop.war").unwrap().build().unwrap();

    let ear = enterprise("app.ear")
        .unwrap()
        .append_module(war)
        .unwrap()
        .append_libraries([archive("shared.jar", &[])])
        .unwrap()
        .build()
        .unwrap();

    let modules: Vec<&str> = ear.modules().iter().map(|m| m.name()).collect();
    assert_eq!(modules, ["shop.war"]);
    assert_eq!(ear.modules()[0].shape(), ArchiveShape::WebDeployable);
    assert!(ear.contains("/lib/shared.jar"));
}

#[test]
fn wrong_shape_cannot_be_narrowed() {
    init_logging();
    let war: Archive = web_deployable("shop.war").unwrap().build().unwrap().into();

    assert!(matches!(
        war.narrow::<kodegen_bundler_archive::EnterpriseArchive>(),
        Err(Error::ShapeMismatch { .. })
    ));
}

