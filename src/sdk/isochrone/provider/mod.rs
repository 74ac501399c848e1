pub mod remote;
pub mod transport;

pub use remote::RemoteIsochroneProvider;
pub use transport::{HttpTransport, RawResponse, Transport};
