use std::convert::Infallible;
use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use typetrack::module::from_fn;
use typetrack::prelude::*;

pub trait Test: Send + Sync + 'static {
    fn data(&self) -> &str;
}

pub struct TestObject {
    data: String,
}

impl TestObject {
    pub fn new(data: &str) -> Self {
        Self {
            data: data.to_owned(),
        }
    }
}

impl Test for TestObject {
    fn data(&self) -> &str {
        &self.data
    }
}

impl Component for TestObject {
    type Constructed = Arc<dyn Test>;

    type Error = Infallible;

    fn construct<I>(_injector: &I) -> Result<Result<Self, Self::Error>, InjectorError>
    where
        I: TypedInjector + ?Sized,
    {
        Ok(Ok(Self::new("test-object")))
    }

    fn post_process(self) -> Self::Constructed {
        Arc::new(self)
    }
}

pub struct AnotherTestObject;

impl Test for AnotherTestObject {
    fn data(&self) -> &str {
        "another-test-object"
    }
}

impl Component for AnotherTestObject {
    type Constructed = Arc<dyn Test>;

    type Error = Infallible;

    fn construct<I>(_injector: &I) -> Result<Result<Self, Self::Error>, InjectorError>
    where
        I: TypedInjector + ?Sized,
    {
        Ok(Ok(Self))
    }

    fn post_process(self) -> Self::Constructed {
        Arc::new(self)
    }
}

#[derive(Debug)]
pub struct Broken;

impl Display for Broken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "broken on purpose")
    }
}

impl Error for Broken {}

pub struct BrokenObject;

impl Test for BrokenObject {
    fn data(&self) -> &str {
        unreachable!("a broken object is never constructed")
    }
}

impl Component for BrokenObject {
    type Constructed = Arc<dyn Test>;

    type Error = Broken;

    fn construct<I>(_injector: &I) -> Result<Result<Self, Self::Error>, InjectorError>
    where
        I: TypedInjector + ?Sized,
    {
        Ok(Err(Broken))
    }

    fn post_process(self) -> Self::Constructed {
        Arc::new(self)
    }
}

fn setup() -> (Container, Arc<TypeTrackingExtension>) {
    let container = Container::new();
    let extension = container
        .add_extension(TypeTrackingExtension::new())
        .unwrap();
    (container, extension)
}

fn register_default(container: &Container) {
    container
        .configure(from_fn(|configurer| {
            bind::<Arc<dyn Test>>()
                .to_component::<TestObject>()
                .set_on(configurer);
            Ok(())
        }))
        .unwrap();
}

fn register_named(container: &Container, name: &'static str) {
    container
        .configure(from_fn(move |configurer| {
            bind::<Arc<dyn Test>>()
                .named(name)
                .to_component::<AnotherTestObject>()
                .set_on(configurer);
            Ok(())
        }))
        .unwrap();
}

#[test]
fn try_resolve_of_unknown_type() {
    let (container, extension) = setup();
    let tracking = extension.resolver(&container);

    assert!(tracking.try_resolve::<Arc<dyn Test>>().unwrap().is_none());
    assert!(tracking
        .try_resolve_named::<Arc<dyn Test>>("name")
        .unwrap()
        .is_none());
}

#[test]
fn try_resolve_of_registered_type() {
    let (container, extension) = setup();
    register_default(&container);
    assert!(container.resolve::<Arc<dyn Test>>().is_ok());

    let tracking = extension.resolver(&container);
    let object = tracking.try_resolve::<Arc<dyn Test>>().unwrap().unwrap();
    assert_eq!(object.data(), "test-object");
}

#[test]
fn try_resolve_of_registered_type_by_name() {
    let (container, extension) = setup();
    register_named(&container, "name");

    let tracking = extension.resolver(&container);
    let object = tracking
        .try_resolve_named::<Arc<dyn Test>>("name")
        .unwrap()
        .unwrap();
    assert_eq!(object.data(), "another-test-object");
    assert!(tracking.try_resolve::<Arc<dyn Test>>().unwrap().is_none());
}

#[test]
fn try_resolve_of_unknown_type_with_fallback() {
    let (container, extension) = setup();
    let tracking = extension.resolver(&container);

    let fallback: Arc<dyn Test> = Arc::new(TestObject::new("hello world"));
    let object = tracking.try_resolve_or(Arc::clone(&fallback)).unwrap();
    assert!(Arc::ptr_eq(&fallback, &object));
    assert_eq!(object.data(), "hello world");

    let object = tracking
        .try_resolve_named_or("name", Arc::clone(&fallback))
        .unwrap();
    assert!(Arc::ptr_eq(&fallback, &object));
}

#[test]
fn try_resolve_of_registered_type_ignores_fallback() {
    let (container, extension) = setup();
    register_default(&container);
    let tracking = extension.resolver(&container);

    let fallback: Arc<dyn Test> = Arc::new(TestObject::new("hello world"));
    let object = tracking.try_resolve_or(Arc::clone(&fallback)).unwrap();
    assert!(!Arc::ptr_eq(&fallback, &object));
    assert_eq!(object.data(), "test-object");
}

#[test]
fn can_resolve_type() {
    let (container, extension) = setup();
    assert!(!extension.resolver(&container).can_resolve::<Arc<dyn Test>>());

    register_default(&container);
    let tracking = extension.resolver(&container);
    assert!(tracking.can_resolve::<Arc<dyn Test>>());
    assert!(tracking.can_resolve_named::<Arc<dyn Test>>(""));
    assert!(!tracking.can_resolve_named::<Arc<dyn Test>>("x"));
}

#[test]
fn can_resolve_by_name() {
    let (container, extension) = setup();
    assert!(!extension
        .resolver(&container)
        .can_resolve_named::<Arc<dyn Test>>("name"));

    register_named(&container, "name");
    let tracking = extension.resolver(&container);
    assert!(tracking.can_resolve_named::<Arc<dyn Test>>("name"));
    assert!(!tracking.can_resolve::<Arc<dyn Test>>());
    assert!(tracking.can_resolve_any::<Arc<dyn Test>>());
}

#[test]
fn resolve_all_with_default_type_only() {
    let (container, extension) = setup();
    register_default(&container);
    let tracking = extension.resolver(&container);

    assert_eq!(tracking.resolve_all::<Arc<dyn Test>>(true).unwrap().len(), 1);
    assert_eq!(tracking.resolve_all::<Arc<dyn Test>>(false).unwrap().len(), 0);
    assert_eq!(tracking.resolve_all_to_array::<Arc<dyn Test>>(true).unwrap().len(), 1);
    assert_eq!(tracking.resolve_all_to_array::<Arc<dyn Test>>(false).unwrap().len(), 0);
}

#[test]
fn resolve_all_with_named_type_only() {
    let (container, extension) = setup();
    register_named(&container, "name");
    let tracking = extension.resolver(&container);

    assert_eq!(tracking.resolve_all::<Arc<dyn Test>>(true).unwrap().len(), 1);
    assert_eq!(tracking.resolve_all::<Arc<dyn Test>>(false).unwrap().len(), 1);
    assert_eq!(tracking.resolve_all_to_array::<Arc<dyn Test>>(true).unwrap().len(), 1);
    assert_eq!(tracking.resolve_all_to_array::<Arc<dyn Test>>(false).unwrap().len(), 1);
}

#[test]
fn resolve_all_with_two_types() {
    let (container, extension) = setup();
    register_default(&container);
    register_named(&container, "name");
    let tracking = extension.resolver(&container);

    let data: Vec<String> = tracking
        .resolve_all::<Arc<dyn Test>>(true)
        .unwrap()
        .map(|object| object.data().to_owned())
        .collect();
    assert_eq!(data, vec!["another-test-object", "test-object"]);

    assert_eq!(tracking.resolve_all::<Arc<dyn Test>>(false).unwrap().len(), 1);
    assert_eq!(tracking.resolve_all_to_array::<Arc<dyn Test>>(true).unwrap().len(), 2);
    assert_eq!(tracking.resolve_all_to_array::<Arc<dyn Test>>(false).unwrap().len(), 1);
}

#[test]
fn resolve_all_with_no_types() {
    let (container, extension) = setup();
    let tracking = extension.resolver(&container);

    assert_eq!(tracking.resolve_all::<Arc<dyn Test>>(true).unwrap().len(), 0);
    assert_eq!(tracking.resolve_all::<Arc<dyn Test>>(false).unwrap().len(), 0);
    assert!(tracking.resolve_all_to_array::<Arc<dyn Test>>(true).unwrap().is_empty());
    assert!(tracking.resolve_all_to_array::<Arc<dyn Test>>(false).unwrap().is_empty());
}

#[test]
fn registrations_before_install_are_not_tracked() {
    let container = Container::new();
    register_default(&container);
    let extension = container
        .add_extension(TypeTrackingExtension::new())
        .unwrap();
    register_named(&container, "late");

    let tracking = extension.resolver(&container);
    assert!(!tracking.can_resolve::<Arc<dyn Test>>());
    assert!(tracking.can_resolve_named::<Arc<dyn Test>>("late"));
    // The container still knows about it.
    assert!(container.resolve::<Arc<dyn Test>>().is_ok());
    assert!(tracking.try_resolve::<Arc<dyn Test>>().unwrap().is_none());
}

#[test]
fn registrations_after_uninstall_are_not_tracked() {
    let (container, extension) = setup();
    register_default(&container);
    let removed = container.remove_extension::<TypeTrackingExtension>().unwrap();
    assert!(Arc::ptr_eq(&extension, &removed));
    assert!(!extension.is_attached());

    register_named(&container, "late");
    let tracking = extension.resolver(&container);
    assert!(tracking.can_resolve::<Arc<dyn Test>>());
    assert!(!tracking.can_resolve_named::<Arc<dyn Test>>("late"));
}

#[test]
fn install_twice_fails() {
    let (container, _extension) = setup();
    assert!(matches!(
        container.add_extension(TypeTrackingExtension::new()),
        Err(ExtensionError::AlreadyInstalled { .. })
    ));
}

#[test]
fn duplicate_registrations_are_tracked_once() {
    let (container, extension) = setup();
    register_named(&container, "name");
    register_named(&container, "name");

    let tracking = extension.resolver(&container);
    assert_eq!(
        extension.index().names(typetrack::key::TypeKey::of::<Arc<dyn Test>>()),
        vec![Name::from("name")]
    );
    assert_eq!(tracking.resolve_all::<Arc<dyn Test>>(true).unwrap().len(), 1);
}

#[test]
fn construction_failures_propagate() {
    let (container, extension) = setup();
    container
        .configure(from_fn(|configurer| {
            bind::<Arc<dyn Test>>()
                .to_component::<BrokenObject>()
                .set_on(configurer);
            Ok(())
        }))
        .unwrap();
    let tracking = extension.resolver(&container);

    assert!(tracking.can_resolve::<Arc<dyn Test>>());
    let Err(err) = tracking.try_resolve::<Arc<dyn Test>>() else {
        panic!("construction should fail");
    };
    assert!(matches!(err, InjectorError::ObjectConstruction { .. }));
    assert!(matches!(
        tracking.try_resolve_or::<Arc<dyn Test>>(Arc::new(AnotherTestObject)),
        Err(InjectorError::ObjectConstruction { .. })
    ));
    assert!(matches!(
        tracking.resolve_all::<Arc<dyn Test>>(true),
        Err(InjectorError::ObjectConstruction { .. })
    ));
    // Without the default, nothing is constructed.
    assert_eq!(tracking.resolve_all::<Arc<dyn Test>>(false).unwrap().len(), 0);
}
