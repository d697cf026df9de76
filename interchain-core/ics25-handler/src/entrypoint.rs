use interchain_core_channel::context::{ExecutionContext, ValidationContext};
use interchain_core_channel::handler::{
    acknowledgement_packet_execute, acknowledgement_packet_validate, recv_packet_execute,
    recv_packet_validate, timeout_packet_execute, timeout_packet_validate,
};
use interchain_core_channel::types::channel::ChannelEnd;
use interchain_core_channel::types::error::ChannelError;
use interchain_core_channel::types::msgs::PacketMsg;
use interchain_core_handler_types::error::ContextError;
use interchain_core_handler_types::msgs::MsgEnvelope;
use interchain_core_host_types::identifiers::{ChannelId, PortId};
use interchain_core_host_types::path::{ChannelEndPath, SeqAckPath, SeqRecvPath, SeqSendPath};
use interchain_core_router::router::{lookup_bound_module, Router};
use interchain_core_router::types::error::RouterError;
use interchain_core_router::types::module::ModuleId;

/// Entrypoint which performs both validation and message execution
pub fn dispatch<Ctx>(
    ctx: &mut Ctx,
    router: &mut impl Router,
    msg: MsgEnvelope,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    tracing::debug!(type_url = %msg.type_url(), "dispatching message");

    validate(ctx, router, &msg).map_err(|e| {
        tracing::warn!(error = %e, kind = ?e.kind(), "message failed validation");
        e
    })?;
    execute(ctx, router, msg).map_err(|e| {
        tracing::error!(error = %e, kind = ?e.kind(), "message failed execution");
        e
    })
}

/// Entrypoint which only performs message validation
///
/// If a transaction contains `n` messages `m_1` ... `m_n`, then
/// they MUST be processed as follows:
///     validate(m_1), execute(m_1), ..., validate(m_n), execute(m_n)
/// That is, the state transition of message `i` must be applied before
/// message `i+1` is validated. This is equivalent to calling
/// `dispatch()` on each successively.
pub fn validate<Ctx>(ctx: &Ctx, router: &impl Router, msg: &MsgEnvelope) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    match msg {
        MsgEnvelope::Packet(msg) => {
            let module_id = bound_module_of(router, msg)?;
            let module = router
                .get_route(&module_id)
                .ok_or(RouterError::MissingModule(module_id))?;

            match msg {
                PacketMsg::Recv(msg) => recv_packet_validate(ctx, msg),
                PacketMsg::Ack(msg) => acknowledgement_packet_validate(ctx, module, msg),
                PacketMsg::Timeout(msg) => timeout_packet_validate(ctx, module, msg),
            }
        }
    }
}

/// Entrypoint which only performs message execution
pub fn execute<Ctx>(
    ctx: &mut Ctx,
    router: &mut impl Router,
    msg: MsgEnvelope,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    match msg {
        MsgEnvelope::Packet(msg) => {
            let module_id = bound_module_of(router, &msg)?;
            let module = router
                .get_route_mut(&module_id)
                .ok_or(RouterError::MissingModule(module_id))?;

            match msg {
                PacketMsg::Recv(msg) => recv_packet_execute(ctx, module, msg),
                PacketMsg::Ack(msg) => acknowledgement_packet_execute(ctx, module, msg),
                PacketMsg::Timeout(msg) => timeout_packet_execute(ctx, module, msg),
            }
        }
    }
}

/// Installs an open channel end on the host and binds it to `module_id`.
///
/// The packet sequences of the channel all start at `1`. This is the only
/// place a channel gets its application; later messages cannot rebind it.
pub fn install_channel<Ctx>(
    ctx: &mut Ctx,
    router: &mut impl Router,
    channel_id: ChannelId,
    channel_end: ChannelEnd,
    module_id: ModuleId,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let chan_end_path = ChannelEndPath::new(&channel_id);
    if ctx.channel_end(&chan_end_path).is_ok() {
        return Err(ChannelError::ChannelAlreadyExists { channel_id }.into());
    }
    if router.get_route(&module_id).is_none() {
        return Err(RouterError::MissingModule(module_id).into());
    }

    let port_id = channel_end.port_id.clone();
    router.bind_channel(port_id.clone(), channel_id.clone(), module_id)?;

    ctx.store_channel(&chan_end_path, channel_end)?;
    ctx.store_next_sequence_send(&SeqSendPath::new(&channel_id), 1.into())?;
    ctx.store_next_sequence_recv(&SeqRecvPath::new(&channel_id), 1.into())?;
    ctx.store_next_sequence_ack(&SeqAckPath::new(&channel_id), 1.into())?;

    tracing::info!(%port_id, %channel_id, "installed channel");

    Ok(())
}

/// The local end of a packet message is the destination of a receive and
/// the source of an acknowledgement or a timeout.
fn local_end_of(msg: &PacketMsg) -> (&PortId, &ChannelId) {
    match msg {
        PacketMsg::Recv(msg) => (&msg.packet.port_id_on_b, &msg.packet.chan_id_on_b),
        PacketMsg::Ack(msg) => (&msg.packet.port_id_on_a, &msg.packet.chan_id_on_a),
        PacketMsg::Timeout(msg) => (&msg.packet.port_id_on_a, &msg.packet.chan_id_on_a),
    }
}

fn bound_module_of(router: &impl Router, msg: &PacketMsg) -> Result<ModuleId, RouterError> {
    let (port_id, channel_id) = local_end_of(msg);
    lookup_bound_module(router, port_id, channel_id)
}
