use std::convert::Infallible;
use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use typetrack::prelude::*;

fn main() -> Result<(), Box<dyn Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();

    let container = Container::new();
    container.add_extension(TypeTrackingExtension::new())?;
    container.configure(FooModule)?;

    let tracking = container.tracking()?;

    println!("can_resolve::<Foo>() == {}", tracking.can_resolve::<Arc<dyn Foo>>());
    println!(
        "can_resolve_named::<Foo>(\"Named\") == {}",
        tracking.can_resolve_named::<Arc<dyn Foo>>("Named")
    );
    println!("can_resolve::<Bar>() == {}", tracking.can_resolve::<Arc<dyn Bar>>());

    if let Some(foo) = tracking.try_resolve::<Arc<dyn Foo>>()? {
        foo.test();
    }
    if let Some(foo) = tracking.try_resolve_named::<Arc<dyn Foo>>("Named")? {
        foo.test();
    }
    println!(
        "try_resolve::<Bar>().is_none() == {}",
        tracking.try_resolve::<Arc<dyn Bar>>()?.is_none()
    );

    let fallback: Arc<dyn Bar> = Arc::new(ABar);
    let bar = tracking.try_resolve_or(Arc::clone(&fallback))?;
    println!("try_resolve_or::<Bar>(fallback) is fallback == {}", Arc::ptr_eq(&bar, &fallback));
    let bar = tracking.try_resolve_named_or("Named", Arc::clone(&fallback))?;
    println!(
        "try_resolve_named_or::<Bar>(\"Named\", fallback) is fallback == {}",
        Arc::ptr_eq(&bar, &fallback)
    );

    println!(
        "resolve_all::<Foo>(true).len() == {}",
        tracking.resolve_all::<Arc<dyn Foo>>(true)?.len()
    );
    println!(
        "resolve_all::<Foo>(false).len() == {}",
        tracking.resolve_all::<Arc<dyn Foo>>(false)?.len()
    );
    println!(
        "resolve_all::<Bar>(true).len() == {}",
        tracking.resolve_all::<Arc<dyn Bar>>(true)?.len()
    );

    println!(
        "resolve_all_to_array::<Foo>(true).len() == {}",
        tracking.resolve_all_to_array::<Arc<dyn Foo>>(true)?.len()
    );
    println!(
        "resolve_all_to_array::<Foo>(false).len() == {}",
        tracking.resolve_all_to_array::<Arc<dyn Foo>>(false)?.len()
    );
    println!(
        "resolve_all_to_array::<Bar>(true).len() == {}",
        tracking.resolve_all_to_array::<Arc<dyn Bar>>(true)?.len()
    );

    Ok(())
}

struct FooModule;

impl Module for FooModule {
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        bind::<Arc<dyn Foo>>()
            .to_component::<AFoo>()
            .set_on(configurer);

        bind::<Arc<dyn Foo>>()
            .named("Named")
            .to_component::<AnotherFoo>()
            .set_on(configurer);

        Ok(())
    }
}

trait Foo: Send + Sync + 'static {
    fn test(&self);
}

trait Bar: Send + Sync + 'static {}

struct AFoo;

impl Foo for AFoo {
    fn test(&self) {
        println!("AFoo test()");
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

struct AnotherFoo;

impl Foo for AnotherFoo {
    fn test(&self) {
        println!("AnotherFoo test()");
    }
}

impl Component for AnotherFoo {
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

struct ABar;

impl Bar for ABar {}
