mod factory;
mod udp_client;

pub use factory::UdpResolverFactory;
pub use udp_client::UdpResolverClient;
