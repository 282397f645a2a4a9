#[derive(Debug, PartialEq, Clone, Copy)]
pub enum LoadingState {
    Idle,    // The committed ring is on screen and accepts navigation
    Loading, // A category switch is in flight, the old ring stays frozen
}
