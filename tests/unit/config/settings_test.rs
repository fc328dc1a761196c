// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置加载测试
///
/// 环境变量是进程级状态，读写都放在同一个测试里
#[cfg(test)]
mod tests {
    use tunemint::config::settings::Settings;

    #[test]
    fn test_environment_overrides_config_files() {
        let settings = Settings::new().unwrap();
        assert!(settings.server.port > 0);
        assert_eq!(settings.chain.network, "devnet");
        assert_eq!(settings.minting.max_retries, 3);

        std::env::set_var("TUNEMINT__CHAIN__NETWORK", "mainnet-beta");
        std::env::set_var("TUNEMINT__MINTING__MAX_RETRIES", "5");
        let overridden = Settings::new();
        std::env::remove_var("TUNEMINT__CHAIN__NETWORK");
        std::env::remove_var("TUNEMINT__MINTING__MAX_RETRIES");

        let overridden = overridden.unwrap();
        assert_eq!(overridden.chain.network, "mainnet-beta");
        assert_eq!(overridden.minting.max_retries, 5);
    }
}
