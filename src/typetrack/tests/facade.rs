use std::convert::Infallible;
use std::error::Error;
use std::sync::Arc;

use typetrack::prelude::*;

trait Foo: Send + Sync + 'static {
    fn name(&self) -> &'static str;
}

trait Bar: Send + Sync + 'static {}

struct AFoo;

impl Foo for AFoo {
    fn name(&self) -> &'static str {
        "AFoo"
    }
}

impl Component for AFoo {
    type Constructed = Arc<dyn Foo>;

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

struct AnotherFoo {
    label: &'static str,
}

impl Foo for AnotherFoo {
    fn name(&self) -> &'static str {
        self.label
    }
}

impl Component for AnotherFoo {
    type Constructed = Arc<dyn Foo>;

    type Error = Infallible;

    fn construct<I>(injector: &I) -> Result<Result<Self, Self::Error>, InjectorError>
    where
        I: TypedInjector + ?Sized,
    {
        let label = injector.resolve_named("label")?;
        Ok(Ok(Self { label }))
    }

    fn post_process(self) -> Self::Constructed {
        Arc::new(self)
    }
}

struct ABar;

impl Bar for ABar {}

struct FooModule;

impl Module for FooModule {
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        bind::<&'static str>()
            .named("label")
            .to_instance("AnotherFoo")
            .set_on(configurer);

        bind::<Arc<dyn Foo>>()
            .to_component::<AFoo>()
            .in_singleton()
            .set_on(configurer);

        bind::<Arc<dyn Foo>>()
            .named("Named")
            .to_component::<AnotherFoo>()
            .set_on(configurer);

        Ok(())
    }
}

fn setup() -> Container {
    let container = Container::new();
    container
        .add_extension(TypeTrackingExtension::new())
        .unwrap();
    container.configure(FooModule).unwrap();
    container
}

#[test]
fn tracking_requires_extension() {
    let container = Container::init(FooModule).unwrap();
    assert!(matches!(
        container.tracking(),
        Err(InjectorError::ExtensionMissing { .. })
    ));
}

#[test]
fn sample_scenario() {
    let container = setup();
    let tracking = container.tracking().unwrap();

    assert!(tracking.can_resolve::<Arc<dyn Foo>>());
    assert!(tracking.can_resolve_named::<Arc<dyn Foo>>("Named"));
    assert!(!tracking.can_resolve_any::<Arc<dyn Bar>>());
    assert_eq!(tracking.resolve_all_to_array::<Arc<dyn Foo>>(true).unwrap().len(), 2);
    assert_eq!(tracking.resolve_all_to_array::<Arc<dyn Foo>>(false).unwrap().len(), 1);
}

#[test]
fn try_resolve_through_facade() {
    let container = setup();
    let tracking = container.tracking().unwrap();

    let foo = tracking.try_resolve::<Arc<dyn Foo>>().unwrap().unwrap();
    assert_eq!(foo.name(), "AFoo");
    let named = tracking
        .try_resolve_named::<Arc<dyn Foo>>("Named")
        .unwrap()
        .unwrap();
    assert_eq!(named.name(), "AnotherFoo");
    assert!(tracking.try_resolve::<Arc<dyn Bar>>().unwrap().is_none());

    let fallback: Arc<dyn Bar> = Arc::new(ABar);
    let bar = tracking.try_resolve_or(Arc::clone(&fallback)).unwrap();
    assert!(Arc::ptr_eq(&fallback, &bar));
    let bar = tracking
        .try_resolve_named_or("Named", Arc::clone(&fallback))
        .unwrap();
    assert!(Arc::ptr_eq(&fallback, &bar));
}

#[test]
fn resolve_all_yields_named_then_default() {
    let container = setup();
    let tracking = container.tracking().unwrap();

    let names: Vec<&'static str> = tracking
        .resolve_all::<Arc<dyn Foo>>(true)
        .unwrap()
        .map(|foo| foo.name())
        .collect();
    assert_eq!(names, vec!["AnotherFoo", "AFoo"]);

    let default = tracking.resolve_all::<Arc<dyn Foo>>(true).unwrap().last().unwrap();
    let singleton: Arc<dyn Foo> = container.resolve().unwrap();
    assert!(Arc::ptr_eq(&default, &singleton));

    assert_eq!(tracking.resolve_all::<Arc<dyn Bar>>(true).unwrap().len(), 0);
    assert!(tracking.resolve_all_to_array::<Arc<dyn Bar>>(true).unwrap().is_empty());
}

#[test]
fn instances_are_tracked() {
    let container = setup();
    let tracking = container.tracking().unwrap();

    assert!(tracking.can_resolve_named::<&'static str>("label"));
    assert!(!tracking.can_resolve::<&'static str>());
    assert_eq!(
        tracking.try_resolve_named::<&'static str>("label").unwrap(),
        Some("AnotherFoo")
    );
}

#[test]
fn late_registrations_are_tracked() {
    let container = setup();
    container
        .configure(typetrack::module::from_fn(|configurer| {
            bind::<Arc<dyn Bar>>()
                .named("late")
                .to_instance(Arc::new(ABar))
                .set_on(configurer);
            Ok(())
        }))
        .unwrap();

    let tracking = container.tracking().unwrap();
    assert!(tracking.can_resolve_any::<Arc<dyn Bar>>());
    assert!(tracking.can_resolve_named::<Arc<dyn Bar>>("late"));
    assert_eq!(tracking.resolve_all::<Arc<dyn Bar>>(false).unwrap().len(), 1);
}
