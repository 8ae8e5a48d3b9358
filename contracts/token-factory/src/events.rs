use casper_types::{Key, U512};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactoryEvent {
    LaunchCreated {
        launch_id: u64,
        token: Key,
        curve: Key,
        creator: Key,
        name: String,
        symbol: String,
    },
    TreasuryUpdated {
        old: Key,
        new: Key,
    },
    PlatformFeeUpdated {
        old_bps: u64,
        new_bps: u64,
    },
    CreationFeeUpdated {
        old: U512,
        new: U512,
    },
    OwnershipTransferred {
        previous: Key,
        new: Key,
    },
    EmergencyWithdrawal {
        to: Key,
        amount: U512,
    },
}
