use serde::{Deserialize, Serialize};

/// Explicit per-chain endpoint configuration.
///
/// Passed by value to every client that needs it; there is no process-wide
/// network registry or shared provider handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    pub name: String,
    pub chain_id: u64,
    pub rpc_url: String,
    pub subgraph_endpoint: String,
}

impl Network {
    pub fn ethereum() -> Self {
        Self {
            id: "ethereum".to_string(),
            name: "Ethereum Mainnet".to_string(),
            chain_id: 1,
            rpc_url: "https://eth.llamarpc.com".to_string(),
            subgraph_endpoint: "https://api.thegraph.com/subgraphs/name/uniswap/uniswap-v3"
                .to_string(),
        }
    }

    pub fn arbitrum() -> Self {
        Self {
            id: "arbitrum".to_string(),
            name: "Arbitrum Mainnet (L2)".to_string(),
            chain_id: 42161,
            rpc_url: "https://arb1.arbitrum.io/rpc".to_string(),
            subgraph_endpoint:
                "https://api.thegraph.com/subgraphs/name/steegecs/uniswap-v3-arbitrum".to_string(),
        }
    }

    /// Looks up a built-in network by id.
    pub fn by_id(id: &str) -> Option<Self> {
        match id {
            "ethereum" => Some(Self::ethereum()),
            "arbitrum" => Some(Self::arbitrum()),
            _ => None,
        }
    }

    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_id_known_networks() {
        assert_eq!(Network::by_id("arbitrum").unwrap().chain_id, 42161);
        assert_eq!(Network::by_id("ethereum").unwrap().chain_id, 1);
        assert!(Network::by_id("base").is_none());
    }

    #[test]
    fn test_rpc_override() {
        let net = Network::arbitrum().with_rpc_url("http://localhost:8545");
        assert_eq!(net.rpc_url, "http://localhost:8545");
    }
}
