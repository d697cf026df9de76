//! Packet lifecycle handlers.
//!
//! Every handler comes as a `*_validate` function that only reads the host
//! state and a `*_execute` function that writes it. Callers run validation to
//! completion before executing, so a failed validation never leaves partial
//! writes behind.

mod acknowledgement;
mod recv_packet;
mod send_packet;
mod timeout;

pub use acknowledgement::*;
pub use recv_packet::*;
pub use send_packet::*;
pub use timeout::*;

use interchain_core_channel_types::channel::{ChannelEnd, Counterparty, State};
use interchain_core_handler_types::error::ContextError;
use interchain_core_handler_types::events::IbcEvent;
use interchain_core_host_types::identifiers::{ChannelId, PortId};
use interchain_core_host_types::path::ChannelEndPath;
use interchain_core_router::types::module::ModuleExtras;

use crate::context::{ExecutionContext, ValidationContext};

/// Loads the channel end `channel_id` and checks that it is open, bound to
/// `port_id` and paired with `counterparty`.
pub(crate) fn open_channel_end<Ctx>(
    ctx: &Ctx,
    port_id: &PortId,
    channel_id: &ChannelId,
    counterparty: &Counterparty,
) -> Result<ChannelEnd, ContextError>
where
    Ctx: ValidationContext,
{
    let chan_end = ctx.channel_end(&ChannelEndPath::new(channel_id))?;

    chan_end.verify_port_matches(channel_id, port_id)?;
    chan_end.verify_state_matches(&State::Open)?;
    chan_end.verify_counterparty_matches(counterparty)?;
    chan_end.verify_connection_hops_length()?;

    Ok(chan_end)
}

/// Forwards the events and logs an application produced during a callback.
pub(crate) fn emit_module_extras<Ctx>(ctx: &mut Ctx, extras: ModuleExtras) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    for module_event in extras.events {
        ctx.emit_ibc_event(IbcEvent::Module(module_event))?;
    }

    for log_message in extras.log {
        ctx.log_message(log_message)?;
    }

    Ok(())
}
