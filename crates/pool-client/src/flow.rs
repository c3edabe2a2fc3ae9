//! The sign-then-submit permit deposit flow
//!
//! A deposit takes two user actions. The first asks the wallet to sign an
//! EIP-2612 permit over the entered amount. The second submits a deposit that
//! carries the permit, so no separate approval transaction is needed. The flow
//! tracks which action is next and refuses to start a second wallet request
//! while one is in flight.
//!
//! Each step is split into a `begin_*` half that validates and marks the flow
//! busy, and a `complete_*` half that applies the outcome. The async helpers
//! ([`PermitDepositFlow::sign`], [`PermitDepositFlow::submit`],
//! [`PermitDepositFlow::confirm`]) chain the two around a call through the
//! [`TypedDataSigner`] and [`PermitDepositor`] boundaries.

use alloy::primitives::{Address, TxHash, U256};
use pool_types::{
    AmountInput, InteractionState, PermitSignature, PoolKind, PoolTypesError, STETH_DECIMALS,
    TokenDomain, TypedPermit, permit::PermitParams,
};
use tracing::{debug, info, warn};
use util::get_current_time_seconds;

use crate::{
    errors::PoolClientError,
    traits::{PermitDepositor, TypedDataSigner},
};

/// The default number of seconds a permit stays valid after signing
pub const DEFAULT_PERMIT_VALIDITY_SECS: u64 = 3600;

// ----------
// | Errors |
// ----------

/// The error type returned by the permit deposit flow
#[derive(Clone, Debug, thiserror::Error)]
pub enum FlowError {
    /// A wallet request is already in flight
    #[error("a wallet request is already pending")]
    Busy,
    /// The entered amount cannot be used
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// The requested action is not available in the current state
    #[error("cannot {action} while {state}")]
    WrongState {
        /// The attempted action
        action: &'static str,
        /// The state the flow was in
        state: InteractionState,
    },
    /// The user declined the request in their wallet
    #[error("request rejected: {0}")]
    Rejected(String),
    /// No wallet is connected
    #[error("wallet disconnected")]
    WalletDisconnected,
    /// A domain-level error
    #[error(transparent)]
    Types(#[from] PoolTypesError),
    /// An error from the chain or the wallet
    #[error(transparent)]
    Client(PoolClientError),
}

impl From<PoolClientError> for FlowError {
    fn from(e: PoolClientError) -> Self {
        match e {
            PoolClientError::Rejected(msg) => FlowError::Rejected(msg),
            PoolClientError::WalletDisconnected => FlowError::WalletDisconnected,
            other => FlowError::Client(other),
        }
    }
}

// ---------
// | Types |
// ---------

/// The wallet request currently in flight
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingRequest {
    /// Waiting on the wallet to sign a permit
    Signing,
    /// Waiting on the wallet to send the deposit transaction
    Submitting,
}

/// The action the user may take next
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowAction {
    /// Sign a permit for the entered amount
    Sign,
    /// Submit the deposit carrying the signed permit
    Deposit,
    /// Wait for the submitted deposit to be included
    AwaitConfirmation,
}

/// A permit together with the wallet's signature over it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedPermit {
    /// The permit that was signed
    pub permit: TypedPermit,
    /// The decomposed signature
    pub signature: PermitSignature,
}

/// Everything needed to broadcast a permit deposit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositRequest {
    /// The pool to deposit into
    pub pool: PoolKind,
    /// The signed amount in base units
    pub amount: U256,
    /// The signed deadline
    pub deadline: U256,
    /// The permit signature
    pub signature: PermitSignature,
}

// --------
// | Flow |
// --------

/// The state of one permit deposit form
#[derive(Clone, Debug)]
pub struct PermitDepositFlow {
    /// The pool deposits go to
    pool: PoolKind,
    /// How long a permit stays valid after signing
    validity_secs: u64,
    /// The entered amount
    amount: AmountInput,
    /// The interaction state
    state: InteractionState,
    /// The wallet request in flight, if any
    pending: Option<PendingRequest>,
    /// The permit awaiting the wallet's signature
    unsigned: Option<TypedPermit>,
    /// The signed permit, held while `Signed` or `Submitted`
    signed: Option<SignedPermit>,
    /// The hash of the submitted deposit
    tx_hash: Option<TxHash>,
}

impl PermitDepositFlow {
    /// Create an idle flow for the given pool
    pub fn new(pool: PoolKind, validity_secs: u64) -> Self {
        Self {
            pool,
            validity_secs,
            amount: AmountInput::default(),
            state: InteractionState::Idle,
            pending: None,
            unsigned: None,
            signed: None,
            tx_hash: None,
        }
    }

    /// The pool deposits go to
    pub fn pool(&self) -> PoolKind {
        self.pool
    }

    /// The interaction state
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// The entered amount
    pub fn amount(&self) -> &AmountInput {
        &self.amount
    }

    /// The wallet request in flight, if any
    pub fn pending(&self) -> Option<PendingRequest> {
        self.pending
    }

    /// The signed permit, if one is held
    pub fn signed_permit(&self) -> Option<&SignedPermit> {
        self.signed.as_ref()
    }

    /// The hash of the submitted deposit, if any
    pub fn tx_hash(&self) -> Option<TxHash> {
        self.tx_hash
    }

    /// The action the user may take next
    pub fn next_action(&self) -> FlowAction {
        match self.state {
            InteractionState::Idle => FlowAction::Sign,
            InteractionState::Signed => FlowAction::Deposit,
            InteractionState::Submitted => FlowAction::AwaitConfirmation,
        }
    }

    /// Whether the action control should be disabled
    ///
    /// It is disabled while a wallet request is in flight, while a deposit
    /// awaits inclusion, and while the entered amount is unusable
    pub fn is_action_disabled(&self) -> bool {
        self.pending.is_some()
            || self.state == InteractionState::Submitted
            || !self.amount.is_valid()
    }

    /// Update the entered amount
    ///
    /// Changing the amount after signing discards the signature and returns
    /// the flow to `Idle`; re-entering the same normalized amount keeps it.
    /// Edits are refused while a request is in flight or a deposit is pending.
    pub fn set_amount(&mut self, raw: &str) -> Result<(), FlowError> {
        if self.pending.is_some() {
            return Err(FlowError::Busy);
        }
        if self.state == InteractionState::Submitted {
            return Err(FlowError::WrongState { action: "edit the amount", state: self.state });
        }

        let amount = AmountInput::new(raw);
        if self.state == InteractionState::Signed && !self.matches_signed_value(&amount) {
            debug!("amount changed after signing, discarding signature");
            self.discard_signature()?;
        }

        self.amount = amount;
        Ok(())
    }

    // -----------
    // | Signing |
    // -----------

    /// Build the permit for the entered amount and mark a signing request in
    /// flight
    ///
    /// `nonce` should be read immediately before calling this
    pub fn begin_sign(
        &mut self,
        domain: TokenDomain,
        owner: Address,
        spender: Address,
        nonce: U256,
        now: u64,
    ) -> Result<TypedPermit, FlowError> {
        self.check_idle_for("sign")?;
        let value = self.amount.to_base_units(STETH_DECIMALS).map_err(|e| match e {
            PoolTypesError::InvalidAmount(msg) => FlowError::InvalidAmount(msg),
            other => FlowError::Types(other),
        })?;
        if value.is_zero() {
            return Err(FlowError::InvalidAmount("amount must be greater than zero".to_string()));
        }

        let deadline = now.saturating_add(self.validity_secs);
        let params = PermitParams { owner, spender, value, nonce, deadline };
        let permit = TypedPermit::new(domain, params, now)?;

        self.pending = Some(PendingRequest::Signing);
        self.unsigned = Some(permit.clone());
        Ok(permit)
    }

    /// Apply the wallet's answer to a signing request
    ///
    /// On success the flow moves to `Signed`. A rejection or any other failure
    /// leaves it `Idle` with no signature held.
    pub fn complete_sign(
        &mut self,
        result: Result<String, PoolClientError>,
    ) -> Result<InteractionState, FlowError> {
        self.pending = None;
        let Some(permit) = self.unsigned.take() else {
            return Err(FlowError::WrongState { action: "complete signing", state: self.state });
        };

        let hex = match result {
            Ok(hex) => hex,
            Err(e) => {
                warn!("permit signing failed: {e}");
                return Err(e.into());
            },
        };
        let signature = PermitSignature::from_hex(&hex)?;

        self.state = self.state.transition(InteractionState::Signed)?;
        self.signed = Some(SignedPermit { permit, signature });
        info!("permit signed for {} stETH", self.amount.value());
        Ok(self.state)
    }

    /// Ask the wallet to sign a permit for the entered amount
    pub async fn sign<S, D>(&mut self, signer: &S, depositor: &D) -> Result<InteractionState, FlowError>
    where
        S: TypedDataSigner,
        D: PermitDepositor,
    {
        self.sign_at(signer, depositor, get_current_time_seconds()).await
    }

    /// Ask the wallet to sign a permit, with the deadline counted from `now`
    pub async fn sign_at<S, D>(
        &mut self,
        signer: &S,
        depositor: &D,
        now: u64,
    ) -> Result<InteractionState, FlowError>
    where
        S: TypedDataSigner,
        D: PermitDepositor,
    {
        self.check_idle_for("sign")?;
        let owner = signer.account().ok_or(FlowError::WalletDisconnected)?;
        let spender = depositor.pool_address(self.pool)?;
        let nonce = depositor.permit_nonce(owner).await?;

        let permit = self.begin_sign(depositor.token_domain(), owner, spender, nonce, now)?;
        let result = signer.sign_typed_data(&permit).await;
        self.complete_sign(result)
    }

    // --------------
    // | Submission |
    // --------------

    /// Take the signed permit for submission and mark a request in flight
    ///
    /// `account` is the wallet's currently connected account. If it is no
    /// longer the permit's owner the signature is discarded and the flow
    /// returns to `Idle`.
    pub fn begin_submit(&mut self, account: Option<Address>) -> Result<DepositRequest, FlowError> {
        if self.pending.is_some() {
            return Err(FlowError::Busy);
        }
        let signed = match (self.state, self.signed.as_ref()) {
            (InteractionState::Signed, Some(signed)) => signed.clone(),
            _ => return Err(FlowError::WrongState { action: "deposit", state: self.state }),
        };

        if account != Some(signed.permit.message.owner) {
            warn!("wallet disconnected since signing, discarding signature");
            self.discard_signature()?;
            return Err(FlowError::WalletDisconnected);
        }

        // The signed value must still match the entered amount
        if !self.matches_signed_value(&self.amount) {
            self.discard_signature()?;
            return Err(FlowError::InvalidAmount("amount changed since signing".to_string()));
        }

        self.pending = Some(PendingRequest::Submitting);
        Ok(DepositRequest {
            pool: self.pool,
            amount: signed.permit.message.value,
            deadline: signed.permit.message.deadline,
            signature: signed.signature,
        })
    }

    /// Apply the outcome of broadcasting the deposit
    ///
    /// A broadcast moves the flow to `Submitted`. A wallet rejection keeps the
    /// signature so the user may retry; any other failure discards it.
    pub fn complete_submit(
        &mut self,
        result: Result<TxHash, PoolClientError>,
    ) -> Result<TxHash, FlowError> {
        self.pending = None;
        match result {
            Ok(tx_hash) => {
                self.state = self.state.transition(InteractionState::Submitted)?;
                self.tx_hash = Some(tx_hash);
                info!("deposit submitted: {tx_hash:#x}");
                Ok(tx_hash)
            },
            Err(PoolClientError::Rejected(msg)) => {
                warn!("deposit rejected in wallet: {msg}");
                Err(FlowError::Rejected(msg))
            },
            Err(e) => {
                warn!("deposit failed: {e}");
                self.discard_signature()?;
                Err(e.into())
            },
        }
    }

    /// Submit the deposit carrying the signed permit
    ///
    /// The signer is consulted for its connected account before anything is
    /// broadcast
    pub async fn submit<S, D>(&mut self, signer: &S, depositor: &D) -> Result<TxHash, FlowError>
    where
        S: TypedDataSigner,
        D: PermitDepositor,
    {
        let req = self.begin_submit(signer.account())?;
        let result = depositor
            .deposit_with_permit(req.pool, req.amount, req.deadline, &req.signature)
            .await;
        self.complete_submit(result)
    }

    // ----------------
    // | Confirmation |
    // ----------------

    /// Apply the outcome of waiting for the deposit
    ///
    /// Either way the permit is spent or void, so the flow returns to `Idle`.
    /// A confirmed deposit also clears the entered amount.
    pub fn complete_confirmation(
        &mut self,
        result: Result<(), PoolClientError>,
    ) -> Result<TxHash, FlowError> {
        let Some(tx_hash) = self.tx_hash else {
            return Err(FlowError::WrongState { action: "confirm", state: self.state });
        };

        self.state = self.state.transition(InteractionState::Idle)?;
        self.signed = None;
        self.tx_hash = None;
        match result {
            Ok(()) => {
                info!("deposit confirmed: {tx_hash:#x}");
                self.amount = AmountInput::default();
                Ok(tx_hash)
            },
            Err(e) => {
                warn!("deposit {tx_hash:#x} did not confirm: {e}");
                Err(e.into())
            },
        }
    }

    /// Wait for the submitted deposit to be included
    pub async fn confirm<D: PermitDepositor>(&mut self, depositor: &D) -> Result<TxHash, FlowError> {
        if self.state != InteractionState::Submitted {
            return Err(FlowError::WrongState { action: "confirm", state: self.state });
        }
        let Some(tx_hash) = self.tx_hash else {
            return Err(FlowError::WrongState { action: "confirm", state: self.state });
        };

        let result = depositor.await_confirmation(tx_hash).await;
        self.complete_confirmation(result)
    }

    /// Return to `Idle`, dropping any signature and pending request but
    /// keeping the entered amount
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.pending = None;
        self.unsigned = None;
        self.signed = None;
        self.tx_hash = None;
    }

    // -----------
    // | Helpers |
    // -----------

    /// Check that a new signing request may start
    fn check_idle_for(&self, action: &'static str) -> Result<(), FlowError> {
        if self.pending.is_some() {
            return Err(FlowError::Busy);
        }
        if self.state != InteractionState::Idle {
            return Err(FlowError::WrongState { action, state: self.state });
        }

        Ok(())
    }

    /// Whether `amount` converts to the value held in the signed permit
    fn matches_signed_value(&self, amount: &AmountInput) -> bool {
        match (self.signed.as_ref(), amount.to_base_units(STETH_DECIMALS)) {
            (Some(signed), Ok(value)) => value == signed.permit.message.value,
            _ => false,
        }
    }

    /// Drop the held signature and fall back to `Idle`
    fn discard_signature(&mut self) -> Result<(), FlowError> {
        self.state = self.state.transition(InteractionState::Idle)?;
        self.signed = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloy::{primitives::Signature, signers::local::PrivateKeySigner};
    use pool_types::Chain;

    use super::*;
    use crate::{
        mocks::{MockDepositor, MockWallet},
        session::WalletSession,
    };

    /// The timestamp tests sign at
    const NOW: u64 = 1_700_000_000;
    /// 1.5 stETH in base units
    const ONE_AND_A_HALF: u128 = 1_500_000_000_000_000_000;

    /// A flow for the raffle pool with the default validity
    fn raffle_flow(amount: &str) -> PermitDepositFlow {
        let mut flow = PermitDepositFlow::new(PoolKind::Raffle, DEFAULT_PERMIT_VALIDITY_SECS);
        flow.set_amount(amount).unwrap();
        flow
    }

    #[tokio::test]
    async fn test_sign_submit_confirm() {
        let wallet = MockWallet::approving();
        let depositor = MockDepositor::new(Chain::Goerli, U256::from(3u64));
        let mut flow = raffle_flow("1.5");
        assert_eq!(flow.next_action(), FlowAction::Sign);

        let state = flow.sign_at(&wallet, &depositor, NOW).await.unwrap();
        assert_eq!(state, InteractionState::Signed);
        assert_eq!(flow.next_action(), FlowAction::Deposit);

        let signed = flow.signed_permit().unwrap().clone();
        let message = &signed.permit.message;
        assert_eq!(message.owner, wallet.address());
        assert_eq!(message.spender, depositor.spender());
        assert_eq!(message.value, U256::from(ONE_AND_A_HALF));
        assert_eq!(message.nonce, U256::from(3u64));
        assert_eq!(message.deadline, U256::from(NOW + DEFAULT_PERMIT_VALIDITY_SECS));

        let sig = Signature::from_raw(&signed.signature.to_bytes()).unwrap();
        let recovered = sig.recover_address_from_prehash(&signed.permit.signing_hash()).unwrap();
        assert_eq!(recovered, wallet.address());

        let tx_hash = flow.submit(&wallet, &depositor).await.unwrap();
        assert_eq!(flow.state(), InteractionState::Submitted);
        assert!(flow.is_action_disabled());

        let deposits = depositor.deposits();
        assert_eq!(deposits.len(), 1);
        assert_eq!(deposits[0].pool, PoolKind::Raffle);
        assert_eq!(deposits[0].amount, U256::from(ONE_AND_A_HALF));
        assert_eq!(deposits[0].deadline, U256::from(NOW + DEFAULT_PERMIT_VALIDITY_SECS));
        assert_eq!(deposits[0].signature, signed.signature);

        assert_eq!(flow.confirm(&depositor).await.unwrap(), tx_hash);
        assert_eq!(flow.state(), InteractionState::Idle);
        assert!(flow.amount().is_empty());
        assert!(flow.signed_permit().is_none());
    }

    #[tokio::test]
    async fn test_rejected_signature_stays_idle() {
        let wallet = MockWallet::rejecting();
        let depositor = MockDepositor::new(Chain::Goerli, U256::ZERO);
        let mut flow = raffle_flow("1.5");

        let res = flow.sign_at(&wallet, &depositor, NOW).await;
        assert!(matches!(res, Err(FlowError::Rejected(_))));
        assert_eq!(flow.state(), InteractionState::Idle);
        assert!(flow.pending().is_none());
        assert!(flow.signed_permit().is_none());

        // No deposit is possible without a signature
        let res = flow.submit(&wallet, &depositor).await;
        assert!(matches!(res, Err(FlowError::WrongState { .. })));
        assert!(depositor.deposits().is_empty());
    }

    #[tokio::test]
    async fn test_disconnected_wallet() {
        let wallet = MockWallet::disconnected();
        let depositor = MockDepositor::new(Chain::Goerli, U256::ZERO);
        let mut flow = raffle_flow("1");

        let res = flow.sign_at(&wallet, &depositor, NOW).await;
        assert!(matches!(res, Err(FlowError::WalletDisconnected)));
        assert_eq!(flow.state(), InteractionState::Idle);
        assert_eq!(wallet.sign_requests(), 0);
    }

    #[test]
    fn test_busy_while_signing() {
        let depositor = MockDepositor::new(Chain::Goerli, U256::ZERO);
        let mut flow = raffle_flow("2");
        let owner = Address::repeat_byte(1);

        flow.begin_sign(depositor.token_domain(), owner, depositor.spender(), U256::ZERO, NOW)
            .unwrap();
        assert_eq!(flow.pending(), Some(PendingRequest::Signing));
        assert!(flow.is_action_disabled());

        let again =
            flow.begin_sign(depositor.token_domain(), owner, depositor.spender(), U256::ZERO, NOW);
        assert!(matches!(again, Err(FlowError::Busy)));
        assert!(matches!(flow.set_amount("3"), Err(FlowError::Busy)));

        let res = flow.complete_sign(Err(PoolClientError::Rejected("denied".to_string())));
        assert!(matches!(res, Err(FlowError::Rejected(_))));
        assert!(!flow.is_action_disabled());
    }

    #[test]
    fn test_invalid_amounts_cannot_sign() {
        let depositor = MockDepositor::new(Chain::Goerli, U256::ZERO);
        let owner = Address::repeat_byte(1);

        let mut empty = PermitDepositFlow::new(PoolKind::Stake, DEFAULT_PERMIT_VALIDITY_SECS);
        assert!(empty.is_action_disabled());
        let res =
            empty.begin_sign(depositor.token_domain(), owner, depositor.spender(), U256::ZERO, NOW);
        assert!(matches!(res, Err(FlowError::InvalidAmount(_))));

        let mut zero = raffle_flow("0");
        let res =
            zero.begin_sign(depositor.token_domain(), owner, depositor.spender(), U256::ZERO, NOW);
        assert!(matches!(res, Err(FlowError::InvalidAmount(_))));
        assert!(zero.pending().is_none());
    }

    #[tokio::test]
    async fn test_amount_change_discards_signature() {
        let wallet = MockWallet::approving();
        let depositor = MockDepositor::new(Chain::Goerli, U256::ZERO);
        let mut flow = raffle_flow("1.5");
        flow.sign_at(&wallet, &depositor, NOW).await.unwrap();

        // The same normalized value keeps the signature
        flow.set_amount("1,5").unwrap();
        assert_eq!(flow.state(), InteractionState::Signed);
        flow.set_amount("1.50").unwrap();
        assert_eq!(flow.state(), InteractionState::Signed);

        flow.set_amount("2").unwrap();
        assert_eq!(flow.state(), InteractionState::Idle);
        assert!(flow.signed_permit().is_none());
        let res = flow.submit(&wallet, &depositor).await;
        assert!(matches!(res, Err(FlowError::WrongState { .. })));
    }

    #[tokio::test]
    async fn test_equal_amount_edit_submits_signed_value() {
        let wallet = MockWallet::approving();
        let depositor = MockDepositor::new(Chain::Goerli, U256::ZERO);
        let mut flow = raffle_flow("1.5");
        flow.sign_at(&wallet, &depositor, NOW).await.unwrap();

        flow.set_amount("1.500").unwrap();
        flow.submit(&wallet, &depositor).await.unwrap();
        assert_eq!(depositor.deposits()[0].amount, U256::from(ONE_AND_A_HALF));
    }

    #[tokio::test]
    async fn test_busy_while_submitting() {
        let wallet = MockWallet::approving();
        let depositor = MockDepositor::new(Chain::Goerli, U256::ZERO);
        let mut flow = raffle_flow("1");
        flow.sign_at(&wallet, &depositor, NOW).await.unwrap();
        assert!(!flow.is_action_disabled());

        flow.begin_submit(Some(wallet.address())).unwrap();
        assert_eq!(flow.pending(), Some(PendingRequest::Submitting));
        assert!(flow.is_action_disabled());
        assert!(matches!(flow.set_amount("2"), Err(FlowError::Busy)));
        assert!(matches!(flow.begin_submit(Some(wallet.address())), Err(FlowError::Busy)));
        let res = flow.sign_at(&wallet, &depositor, NOW).await;
        assert!(matches!(res, Err(FlowError::Busy)));

        let tx_hash = TxHash::repeat_byte(7);
        assert_eq!(flow.complete_submit(Ok(tx_hash)).unwrap(), tx_hash);
        assert_eq!(flow.state(), InteractionState::Submitted);
        assert!(flow.pending().is_none());
        assert!(flow.is_action_disabled());
    }

    #[tokio::test]
    async fn test_submit_refuses_unsigned_amount() {
        let wallet = MockWallet::approving();
        let depositor = MockDepositor::new(Chain::Goerli, U256::ZERO);
        let mut flow = raffle_flow("1");
        flow.sign_at(&wallet, &depositor, NOW).await.unwrap();

        // Bypass `set_amount`, which would already discard the signature
        flow.amount = AmountInput::new("2");
        let res = flow.submit(&wallet, &depositor).await;
        assert!(matches!(res, Err(FlowError::InvalidAmount(_))));
        assert_eq!(flow.state(), InteractionState::Idle);
        assert!(flow.signed_permit().is_none());
        assert!(depositor.deposits().is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_before_submit() {
        let depositor = MockDepositor::new(Chain::Goerli, U256::ZERO);
        let mut session = WalletSession::new(Chain::Goerli);
        session.connect(PrivateKeySigner::random());
        let mut flow = raffle_flow("1");
        flow.sign_at(&session, &depositor, NOW).await.unwrap();

        session.disconnect();
        let res = flow.submit(&session, &depositor).await;
        assert!(matches!(res, Err(FlowError::WalletDisconnected)));
        assert_eq!(flow.state(), InteractionState::Idle);
        assert!(flow.signed_permit().is_none());
        assert!(flow.pending().is_none());
        assert!(depositor.deposits().is_empty());
        assert_eq!(flow.amount().value(), "1");
    }

    #[tokio::test]
    async fn test_account_switch_before_submit() {
        let depositor = MockDepositor::new(Chain::Goerli, U256::ZERO);
        let mut session = WalletSession::new(Chain::Goerli);
        session.connect(PrivateKeySigner::random());
        let mut flow = raffle_flow("1");
        flow.sign_at(&session, &depositor, NOW).await.unwrap();

        session.connect(PrivateKeySigner::random());
        let res = flow.submit(&session, &depositor).await;
        assert!(matches!(res, Err(FlowError::WalletDisconnected)));
        assert_eq!(flow.state(), InteractionState::Idle);
        assert!(depositor.deposits().is_empty());
    }

    #[tokio::test]
    async fn test_reset_keeps_amount() {
        let wallet = MockWallet::approving();
        let depositor = MockDepositor::new(Chain::Goerli, U256::ZERO);
        let mut flow = raffle_flow("0.25");
        flow.sign_at(&wallet, &depositor, NOW).await.unwrap();

        flow.reset();
        assert_eq!(flow.state(), InteractionState::Idle);
        assert!(flow.signed_permit().is_none());
        assert_eq!(flow.amount().value(), "0.25");
        assert_eq!(flow.next_action(), FlowAction::Sign);
    }

    #[tokio::test]
    async fn test_rejected_deposit_keeps_signature() {
        let wallet = MockWallet::approving();
        let depositor = MockDepositor::new(Chain::Goerli, U256::ZERO)
            .failing_deposit(PoolClientError::Rejected("user denied".to_string()));
        let mut flow = raffle_flow("1");
        flow.sign_at(&wallet, &depositor, NOW).await.unwrap();

        let res = flow.submit(&wallet, &depositor).await;
        assert!(matches!(res, Err(FlowError::Rejected(_))));
        assert_eq!(flow.state(), InteractionState::Signed);
        assert!(flow.signed_permit().is_some());
        assert!(flow.pending().is_none());
    }

    #[tokio::test]
    async fn test_reverted_deposit_returns_to_idle() {
        let wallet = MockWallet::approving();
        let depositor = MockDepositor::new(Chain::Goerli, U256::ZERO)
            .failing_deposit(PoolClientError::Reverted("ERC20Permit: invalid signature".to_string()));
        let mut flow = raffle_flow("1");
        flow.sign_at(&wallet, &depositor, NOW).await.unwrap();

        let res = flow.submit(&wallet, &depositor).await;
        match res {
            Err(FlowError::Client(PoolClientError::Reverted(reason))) => {
                assert_eq!(reason, "ERC20Permit: invalid signature")
            },
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(flow.state(), InteractionState::Idle);
        assert!(flow.signed_permit().is_none());
        assert_eq!(flow.amount().value(), "1");
    }

    #[tokio::test]
    async fn test_failed_confirmation_returns_to_idle() {
        let wallet = MockWallet::approving();
        let depositor = MockDepositor::new(Chain::Goerli, U256::ZERO)
            .failing_confirmation(PoolClientError::TxFailed("status 0".to_string()));
        let mut flow = raffle_flow("1");
        flow.sign_at(&wallet, &depositor, NOW).await.unwrap();
        flow.submit(&wallet, &depositor).await.unwrap();

        // Edits are refused while the deposit is pending
        assert!(matches!(flow.set_amount("5"), Err(FlowError::WrongState { .. })));

        let res = flow.confirm(&depositor).await;
        assert!(matches!(res, Err(FlowError::Client(PoolClientError::TxFailed(_)))));
        assert_eq!(flow.state(), InteractionState::Idle);
        assert_eq!(flow.amount().value(), "1");
    }

    #[tokio::test]
    async fn test_permit_domain_binds_chain() {
        let wallet = MockWallet::approving();
        let depositor = MockDepositor::new(Chain::EthereumMainnet, U256::ZERO);
        let mut flow = raffle_flow("1");
        flow.sign_at(&wallet, &depositor, NOW).await.unwrap();

        let permit = &flow.signed_permit().unwrap().permit;
        assert_eq!(permit.domain, TokenDomain::steth(Chain::EthereumMainnet, depositor.token()));
    }
}
