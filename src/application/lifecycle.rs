/// Hooks a host UI framework calls for one embedded view.
///
/// The framework creates the view once, updates it on every host render
/// with fresh inputs, and destroys it when the view leaves the hierarchy.
pub trait ViewLifecycle: Sized {
    /// Long-lived state the framework passes to every creation.
    type Context;
    type Inputs;

    fn on_create(context: &Self::Context, inputs: Self::Inputs) -> Self;

    fn on_update(&mut self, inputs: Self::Inputs);

    fn on_destroy(self);
}
