//! ABI definitions for the stETH token and the pool contracts
//!
//! These only cover the functions the client calls; the deployed contracts
//! expose more.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IERC20Permit {
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function nonces(address owner) external view returns (uint256);
        function DOMAIN_SEPARATOR() external view returns (bytes32);
        function symbol() external view returns (string);
    }
}

sol! {
    #[sol(rpc)]
    interface IRafflePool {
        function depositEth() external payable;
        function depositStEth(uint256 amount) external;
        function depositStEthWithPermit(uint256 amount, uint256 deadline, uint8 v, bytes32 r, bytes32 s) external;
        function withdrawStEth(uint256 amount) external;
        function getUserDeposit(address user) external view returns (uint256);
        function getTotalBalance() external view returns (uint256);
        function getTotalUserDeposits() external view returns (uint256);
        function getLastTimestamp() external view returns (uint256);
        function getActiveDepositorsCount() external view returns (uint256);
    }
}

sol! {
    #[sol(rpc)]
    interface IStakePool {
        function depositETH() external payable;
        function depositStEth(uint256 amount) external;
        function depositStEthWithPermit(uint256 amount, uint256 deadline, uint8 v, bytes32 r, bytes32 s) external;
        function withdrawStETH(uint256 amount) external;
        function balanceOf(address user) external view returns (uint256);
        function totalBalance() external view returns (uint256);
        function userDepositsTotal() external view returns (uint256);
        function stakingRewardsTotal() external view returns (uint256);
    }
}

sol! {
    #[sol(rpc)]
    interface IDonationFactory {
        function createDonationPool(address manager, address beneficiary, string title) external returns (address);
        function getDonationPoolsCount() external view returns (uint256);
        function getDonationPoolAddress(uint256 index) external view returns (address);
    }
}
